//! Individual risk factors for progressing from exposure to disease.

/// The behavioural and clinical traits that scale a citizen's chance of
/// progressing from `Exposed` to `Infected`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RiskProfile {
    pub immunosuppressed: bool,
    pub smoker:           bool,
    pub drinks_alcohol:   bool,
}

impl RiskProfile {
    /// Multiplicative risk factor.
    ///
    /// Immunosuppression multiplies the baseline by `immunodeficiency_fold`;
    /// smoking and alcohol each multiply it by `risk_factor_adjustment`.
    /// Factors compose, so an immunosuppressed smoker who drinks carries
    /// `fold * adjustment²`.
    pub fn multiplier(self, immunodeficiency_fold: f64, risk_factor_adjustment: f64) -> f64 {
        let mut m = 1.0;
        if self.immunosuppressed {
            m *= immunodeficiency_fold;
        }
        if self.smoker {
            m *= risk_factor_adjustment;
        }
        if self.drinks_alcohol {
            m *= risk_factor_adjustment;
        }
        m
    }
}
