use crate::error::{ChartError, ChartResult};

/// Step multipliers tried, in order, when rounding a rough tick step.
const NICE_STEP_FACTORS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Linear axis domain rounded outward to whole tick steps.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTicks {
    pub domain_min: f64,
    pub domain_max: f64,
    pub step: f64,
    pub values: Vec<f64>,
}

/// Log axis domain expanded to whole decades, one tick per decade.
#[derive(Debug, Clone, PartialEq)]
pub struct DecadeTicks {
    pub domain_min: f64,
    pub domain_max: f64,
    pub values: Vec<f64>,
}

/// Picks roughly `target_count` evenly stepped ticks covering `[min, max]`.
///
/// Steps are `{1, 2, 2.5, 5} * 10^k`. The returned domain snaps outward to the
/// first and last tick.
pub fn nice_linear_ticks(min: f64, max: f64, target_count: usize) -> ChartResult<LinearTicks> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "tick bounds must be finite".to_owned(),
        ));
    }
    if target_count < 2 {
        return Err(ChartError::InvalidData(
            "tick count must be >= 2".to_owned(),
        ));
    }

    let (min, max) = if max > min { (min, max) } else { (min, min + 1.0) };
    let rough = (max - min) / (target_count - 1) as f64;
    let magnitude = 10f64.powi(rough.log10().floor() as i32);
    let normalized = rough / magnitude;
    let factor = NICE_STEP_FACTORS
        .iter()
        .copied()
        .find(|factor| *factor >= normalized - 1e-12)
        .unwrap_or(10.0);
    let step = factor * magnitude;

    let first = (min / step).floor() as i64;
    let last = (max / step).ceil() as i64;
    let values: Vec<f64> = (first..=last).map(|k| k as f64 * step).collect();

    Ok(LinearTicks {
        domain_min: first as f64 * step,
        domain_max: last as f64 * step,
        step,
        values,
    })
}

/// Nearest `f64` to `10^exp`; `powi` drifts by an ulp for negative exponents.
fn power_of_ten(exp: i32) -> f64 {
    format!("1e{exp}").parse().unwrap_or_else(|_| 10f64.powi(exp))
}

/// Expands `[min, max]` to whole powers of ten and returns one tick per decade.
pub fn decade_ticks(min: f64, max: f64) -> ChartResult<DecadeTicks> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || max <= 0.0 {
        return Err(ChartError::InvalidData(
            "log ticks need finite bounds > 0".to_owned(),
        ));
    }

    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let low = min.log10().floor() as i32;
    let mut high = max.log10().ceil() as i32;
    if high <= low {
        high = low + 1;
    }
    let values: Vec<f64> = (low..=high).map(power_of_ten).collect();

    Ok(DecadeTicks {
        domain_min: power_of_ten(low),
        domain_max: power_of_ten(high),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::{decade_ticks, nice_linear_ticks};
    use approx::assert_relative_eq;

    #[test]
    fn staking_stakes_round_to_twenty_thousand_steps() {
        let ticks = nice_linear_ticks(0.0, 50_000.0, 5).expect("ticks");
        assert_eq!(ticks.values, vec![0.0, 20_000.0, 40_000.0, 60_000.0]);
        assert_relative_eq!(ticks.domain_max, 60_000.0);
    }

    #[test]
    fn emission_supply_uses_quarter_steps() {
        let ticks = nice_linear_ticks(0.0, 1_000.0, 5).expect("ticks");
        assert_eq!(ticks.values, vec![0.0, 250.0, 500.0, 750.0, 1_000.0]);
    }

    #[test]
    fn degenerate_range_still_yields_ticks() {
        let ticks = nice_linear_ticks(0.0, 0.0, 5).expect("ticks");
        assert!(ticks.values.len() >= 2);
        assert!(ticks.domain_max > ticks.domain_min);
    }

    #[test]
    fn decades_cover_eth_transfer_costs() {
        let ticks = decade_ticks(0.000_002, 1.26).expect("ticks");
        assert_eq!(ticks.values.len(), 8);
        assert_relative_eq!(ticks.domain_min, 1e-6);
        assert_relative_eq!(ticks.domain_max, 10.0);
        assert_eq!(ticks.values[2], 0.000_1);
    }

    #[test]
    fn single_decade_is_widened() {
        let ticks = decade_ticks(10.0, 10.0).expect("ticks");
        assert_eq!(ticks.values.len(), 2);
        assert!(decade_ticks(0.0, 1.0).is_err());
    }
}
