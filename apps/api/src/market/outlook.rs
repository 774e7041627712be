//! Outlook projection: short-term demand forecasts for a role.

use serde::{Deserialize, Serialize};

const SIX_MONTH_CONFIDENCE: f64 = 0.85;
const ONE_YEAR_CONFIDENCE: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub projected_demand: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureOutlook {
    pub six_month_outlook: Projection,
    pub one_year_outlook: Projection,
}

pub trait OutlookProjector: Send + Sync {
    /// `demand` is the 0–100 index, `growth` the yearly growth in percent.
    fn project(&self, demand: f64, growth: f64) -> FutureOutlook;
}

/// Linear projection: half the yearly growth at six months, all of it at one year.
pub struct LinearProjector;

impl OutlookProjector for LinearProjector {
    fn project(&self, demand: f64, growth: f64) -> FutureOutlook {
        FutureOutlook {
            six_month_outlook: Projection {
                projected_demand: round2(demand * (1.0 + growth / 200.0)),
                confidence: SIX_MONTH_CONFIDENCE,
            },
            one_year_outlook: Projection {
                projected_demand: round2(demand * (1.0 + growth / 100.0)),
                confidence: ONE_YEAR_CONFIDENCE,
            },
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_projection_values() {
        let outlook = LinearProjector.project(92.0, 18.0);
        assert_eq!(outlook.six_month_outlook.projected_demand, 100.28);
        assert_eq!(outlook.one_year_outlook.projected_demand, 108.56);
        assert_eq!(outlook.six_month_outlook.confidence, 0.85);
        assert_eq!(outlook.one_year_outlook.confidence, 0.75);
    }

    #[test]
    fn test_negative_growth_projects_decline() {
        let outlook = LinearProjector.project(80.0, -10.0);
        assert_eq!(outlook.six_month_outlook.projected_demand, 76.0);
        assert_eq!(outlook.one_year_outlook.projected_demand, 72.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(86.91666), 86.92);
        assert_eq!(round2(-0.004), -0.0);
    }
}
