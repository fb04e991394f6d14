//! Human- and machine-readable output for command results.

use std::io::{self, Write};

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use tax_core::{ImpactResult, LabeledRegimeResult, Regime, RegimeCalculator, RegimeSet};

use crate::cli::RegimesFormat;

/// Formats a money amount with two decimals and `,` thousands separators.
pub fn money(value: Decimal) -> String {
    let formatted = format!("{:.2}", round_half_up(value));
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{fraction}")
}

/// Formats a fraction (`0.145`) as a percentage (`14.50%`).
pub fn percent(fraction: Decimal) -> String {
    format!("{:.2}%", round_half_up(fraction * Decimal::ONE_HUNDRED))
}

pub fn impact_json<W: Write>(
    out: &mut W,
    result: &ImpactResult,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

pub fn impact_text<W: Write>(
    out: &mut W,
    result: &ImpactResult,
    regimes: &RegimeSet,
) -> io::Result<()> {
    let current = &result.current;
    let proposed = &result.proposed;

    writeln!(out, "Monthly income   {:>18}", money(result.monthly_income))?;
    writeln!(out, "Annual income    {:>18}", money(result.annual_income))?;
    writeln!(out)?;
    writeln!(out, "{:<16} {:>18} {:>18}", "", current.label, proposed.label)?;

    let rows: [(&str, fn(&LabeledRegimeResult) -> String); 6] = [
        ("Gross income", |r| money(r.result.gross_income)),
        ("Relief", |r| money(r.result.consolidated_relief)),
        ("Taxable income", |r| money(r.result.taxable_income)),
        ("Annual tax", |r| money(r.result.annual_tax)),
        ("Monthly tax", |r| money(r.result.monthly_tax)),
        ("Effective rate", |r| percent(r.result.effective_rate)),
    ];
    for (name, field) in rows {
        writeln!(out, "{name:<16} {:>18} {:>18}", field(current), field(proposed))?;
    }

    if result.annual_income <= regimes.exemption_threshold() {
        writeln!(out)?;
        writeln!(
            out,
            "Annual income is within the {} exemption threshold.",
            money(regimes.exemption_threshold())
        )?;
    } else {
        for (regime, labeled) in [(regimes.current(), current), (regimes.proposed(), proposed)] {
            writeln!(out)?;
            band_walk(out, regime, labeled.result.taxable_income)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Annual relief    {:>18}", money(result.impact.annual_relief))?;
    writeln!(out, "Monthly relief   {:>18}", money(result.impact.monthly_relief))?;
    writeln!(out, "Change           {:>17.2}%", result.impact.percentage_change)
}

fn band_walk<W: Write>(
    out: &mut W,
    regime: &Regime,
    taxable_income: Decimal,
) -> io::Result<()> {
    writeln!(out, "{} bracket walk", regime.label())?;
    for band in RegimeCalculator::new(regime).band_breakdown(taxable_income) {
        let upper = band
            .bracket
            .upper_bound
            .map(money)
            .unwrap_or_else(|| "and above".to_string());
        writeln!(
            out,
            "  {:>16} - {:<16} {:>7} {:>18} {:>16}",
            money(band.bracket.lower_bound),
            upper,
            percent(band.bracket.rate),
            money(band.taxable_portion),
            money(band.tax)
        )?;
    }
    Ok(())
}

pub fn regimes<W: Write>(
    out: &mut W,
    regimes: &RegimeSet,
    format: RegimesFormat,
) -> io::Result<()> {
    match format {
        RegimesFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, regimes)?;
            writeln!(out)
        }
        RegimesFormat::Toml => {
            let contents = toml::to_string(regimes).map_err(io::Error::other)?;
            out.write_all(contents.as_bytes())
        }
        RegimesFormat::Text => {
            writeln!(
                out,
                "Exemption threshold: {}",
                money(regimes.exemption_threshold())
            )?;
            for regime in [regimes.current(), regimes.proposed()] {
                writeln!(out)?;
                regime_text(out, regime)?;
            }
            Ok(())
        }
    }
}

fn regime_text<W: Write>(
    out: &mut W,
    regime: &Regime,
) -> io::Result<()> {
    let relief = regime.relief();
    writeln!(out, "{} ({})", regime.label(), regime.code().as_str())?;
    writeln!(
        out,
        "  Relief: max({}, {} of gross) + {} of gross",
        money(relief.floor_amount),
        percent(relief.floor_rate),
        percent(relief.flat_rate)
    )?;
    for bracket in regime.brackets().brackets() {
        let upper = bracket
            .upper_bound
            .map(money)
            .unwrap_or_else(|| "and above".to_string());
        writeln!(
            out,
            "  {:>16} - {:<16} {:>7}",
            money(bracket.lower_bound),
            upper,
            percent(bracket.rate)
        )?;
    }
    Ok(())
}
