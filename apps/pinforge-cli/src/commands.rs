//! # Command Handlers
//!
//! One function per subcommand. Each loads the catalog, calls the engine and
//! renders the result as text or JSON.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_catalog ──► build_selections ──► validate_order_selections        │
//! │  (override dir      (ids ──► options,       │                           │
//! │   or built-in)       free defaults)         ▼                           │
//! │                                  Quote::price(mold_fee_config)          │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                render_quote / JSON                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{bail, Context, Result};
use pinforge_core::catalog::{available_quantities, available_sizes, default_option};
use pinforge_core::validation::{validate_order_selections, PartialSelections};
use pinforge_core::{
    calculate_mold_fee, format_currency, validate_catalog, AddOnOption, Catalog, DesignSides,
    MoldFeeCalculationResult, MoldFeeConfig, PricingResult, ProductLine, Quote,
};
use std::fs;
use tracing::{info, warn};

use crate::cli::{Line, QuoteArgs};
use crate::config::{CliConfig, OutputFormat};

// =============================================================================
// Catalog Loading
// =============================================================================

/// Loads the catalog for `line`, from `catalog_dir` if configured.
pub fn load_catalog(cfg: &CliConfig, line: ProductLine) -> Result<Catalog> {
    let catalog = match &cfg.catalog_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.json", line));
            info!(path = %path.display(), "Loading catalog override");
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            Catalog::from_json(&text)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?
        }
        None => Catalog::builtin(line)?,
    };

    if catalog.product_line != line {
        bail!(
            "Catalog for {} declares product line {}",
            line,
            catalog.product_line
        );
    }

    let report = validate_catalog(&catalog);
    for error in &report.errors {
        warn!(line = %line, "{}", error);
    }

    Ok(catalog)
}

/// The catalog's mold fee rules, with the configured boundary if one is set.
fn mold_fee_config(cfg: &CliConfig, catalog: &Catalog) -> MoldFeeConfig {
    let rules = catalog.mold_fee_config();
    match cfg.exemption_boundary {
        Some(boundary) => rules.with_boundary(boundary),
        None => rules,
    }
}

/// The named option, or the list's default when no id is given.
fn pick_option<'a>(
    options: &'a [AddOnOption],
    id: Option<&str>,
    find: impl Fn(&str) -> PricingResult<&'a AddOnOption>,
) -> Result<Option<AddOnOption>> {
    match id {
        Some(id) => Ok(Some(find(id)?.clone())),
        None => Ok(default_option(options).cloned()),
    }
}

fn design_sides(line: ProductLine, two_sided: bool) -> Option<DesignSides> {
    if !line.has_design_sides() {
        if two_sided {
            warn!(line = %line, "--two-sided ignored for this product line");
        }
        return None;
    }
    Some(if two_sided {
        DesignSides::TwoSided
    } else {
        DesignSides::OneSided
    })
}

// =============================================================================
// quote
// =============================================================================

/// Builds complete selections from command-line arguments.
pub fn build_selections(args: &QuoteArgs, catalog: &Catalog) -> Result<PartialSelections> {
    let line = ProductLine::from(args.line);

    let backing = if line.has_backing() {
        pick_option(&catalog.backing_options, args.backing.as_deref(), |id| {
            catalog.find_backing(id)
        })?
    } else {
        if args.backing.is_some() {
            warn!(line = %line, "--backing ignored for this product line");
        }
        None
    };

    Ok(PartialSelections {
        product_line: line,
        method: Some(catalog.find_method(&args.method)?.clone()),
        plating: pick_option(&catalog.plating_options, args.plating.as_deref(), |id| {
            catalog.find_plating(id)
        })?,
        size: Some(args.size.clone()),
        quantity: Some(args.quantity),
        backing,
        packaging: pick_option(&catalog.packaging_options, args.packaging.as_deref(), |id| {
            catalog.find_packaging(id)
        })?,
        rush_order: args.rush,
        design_sides: design_sides(line, args.two_sided),
    })
}

pub fn quote(args: &QuoteArgs, cfg: &CliConfig) -> Result<()> {
    let catalog = load_catalog(cfg, args.line.into())?;
    let partial = build_selections(args, &catalog)?;

    let problems = validate_order_selections(&partial, &catalog);
    if !problems.is_empty() {
        let lines: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!("Cannot quote this order:\n  {}", lines.join("\n  "));
    }

    let quote = Quote::price(partial.into_order()?, &mold_fee_config(cfg, &catalog));
    info!(id = %quote.id, total = quote.breakdown.total, "Quote generated");

    match cfg.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
        OutputFormat::Text => print!("{}", render_quote(&quote)),
    }
    Ok(())
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<28}{:>14}\n", label, value));
}

/// Human-readable itemized breakdown.
pub fn render_quote(quote: &Quote) -> String {
    let s = &quote.selections;
    let b = &quote.breakdown;
    let mut out = String::new();

    out.push_str(&format!("Quote {} ({})\n", quote.id, s.product_line));
    out.push_str(&format!("  {}, {}\" x {}\n", s.method.name, s.size, s.quantity));
    match s.design_sides {
        Some(DesignSides::OneSided) => out.push_str("  One-sided design\n"),
        Some(DesignSides::TwoSided) => out.push_str("  Two-sided design\n"),
        None => {}
    }
    out.push('\n');

    row(
        &mut out,
        &format!("Base ({} @ {})", s.quantity, format_currency(b.unit_price)),
        &format_currency(b.base_price),
    );
    if b.setup_fee > 0.0 {
        row(&mut out, "Setup fee", &format_currency(b.setup_fee));
    }
    row(&mut out, &add_on_label("Plating", &s.plating), &format_currency(b.plating_cost));
    if s.product_line.has_backing() {
        row(&mut out, &add_on_label("Backing", &s.backing), &format_currency(b.backing_cost));
    }
    row(&mut out, &add_on_label("Packaging", &s.packaging), &format_currency(b.packaging_cost));
    if b.mold_fee_waived {
        row(&mut out, "Mold fee", "waived");
    } else {
        row(&mut out, "Mold fee", &format_currency(b.mold_fee));
    }
    if s.rush_order {
        row(&mut out, "Rush (20%)", &format_currency(b.rush_fee));
    }
    out.push_str(&format!("  {}\n", "-".repeat(42)));
    row(&mut out, "Total", &quote.formatted_total());

    out
}

fn add_on_label(kind: &str, option: &Option<AddOnOption>) -> String {
    match option {
        Some(option) => format!("{}: {}", kind, option.name),
        None => kind.to_string(),
    }
}

// =============================================================================
// mold-fee
// =============================================================================

pub fn mold_fee(line: Line, size: &str, quantity: i64, two_sided: bool, cfg: &CliConfig) -> Result<()> {
    let line = ProductLine::from(line);
    let catalog = load_catalog(cfg, line)?;
    let result = calculate_mold_fee(
        size,
        quantity,
        design_sides(line, two_sided),
        &mold_fee_config(cfg, &catalog),
    );

    match cfg.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => println!("{}", render_mold_fee(&result)),
    }
    Ok(())
}

pub fn render_mold_fee(result: &MoldFeeCalculationResult) -> String {
    match (&result.reason, result.waived) {
        (Some(reason), true) => format!("Mold fee: waived ({})", reason),
        (Some(reason), false) => format!("Mold fee: {} ({})", format_currency(result.fee), reason),
        (None, _) => format!("Mold fee: {}", format_currency(result.fee)),
    }
}

// =============================================================================
// validate
// =============================================================================

pub fn validate(line: Option<Line>, cfg: &CliConfig) -> Result<()> {
    let lines = match line {
        Some(line) => vec![ProductLine::from(line)],
        None => vec![ProductLine::Pins, ProductLine::Coins],
    };

    let mut failed = 0;
    for line in lines {
        let catalog = load_catalog(cfg, line)?;
        let report = validate_catalog(&catalog);

        if report.is_valid {
            println!("✓ {} catalog is valid", line);
        } else {
            failed += 1;
            println!("✗ {} catalog has {} problem(s):", line, report.errors.len());
            for error in &report.errors {
                println!("  - {}", error);
            }
        }
    }

    if failed > 0 {
        bail!("{} catalog(s) failed validation", failed);
    }
    Ok(())
}

// =============================================================================
// catalog
// =============================================================================

pub fn catalog(line: Line, cfg: &CliConfig) -> Result<()> {
    let catalog = load_catalog(cfg, line.into())?;

    match cfg.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Text => print!("{}", render_catalog(&catalog)),
    }
    Ok(())
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} catalog\n", catalog.product_line));

    out.push_str("\nMethods:\n");
    for method in &catalog.methods {
        let setup = method
            .setup_fee
            .map(|fee| format!(", setup {}", format_currency(fee)))
            .unwrap_or_default();
        out.push_str(&format!("  {:<18}{}{}\n", method.id, method.name, setup));
        let sizes = available_sizes(method);
        if let Some(first) = sizes.first() {
            let quantities: Vec<String> = available_quantities(method, first)
                .iter()
                .map(ToString::to_string)
                .collect();
            out.push_str(&format!("    sizes: {}\n", sizes.join(", ")));
            out.push_str(&format!("    tiers: {}\n", quantities.join(", ")));
        }
    }

    let mut section = |title: &str, options: &[AddOnOption]| {
        if options.is_empty() {
            return;
        }
        out.push_str(&format!("\n{}:\n", title));
        for option in options {
            let price = if option.is_free {
                "free".to_string()
            } else {
                format!("+{}/pc", format_currency(option.price))
            };
            out.push_str(&format!("  {:<18}{:<24}{}\n", option.id, option.name, price));
        }
    };
    section("Plating", &catalog.plating_options);
    section("Backing", &catalog.backing_options);
    section("Packaging", &catalog.packaging_options);

    out
}
