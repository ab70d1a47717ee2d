//! Day count conventions for converting dates into year fractions.
//!
//! Volatility surfaces are parameterised by time in years. The conversion from
//! calendar dates is delegated to a [`DayCountConvention`], which measures
//! the distance between two dates.
//!
//! # Examples
//!
//! ```
//! use pricer_surface::types::time::DayCountConvention;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//!
//! let yf = DayCountConvention::ActualActual365.relative_year_fraction(start, end);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Industry-standard day count conventions.
///
/// # Usage
///
/// ```
/// use pricer_surface::types::time::DayCountConvention;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// let act_360 = DayCountConvention::ActualActual360;
/// assert!((act_360.relative_year_fraction(start, end) - 0.5056).abs() < 0.001);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    ///
    /// The usual choice for option expiries.
    #[default]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    ActualActual360,

    /// 30/360 US Bond Basis
    ///
    /// Each month is treated as having 30 days, and the year as 360 days.
    Thirty360,

    /// Actual/Actual ISDA
    ///
    /// Days falling in leap years count 1/366, all other days 1/365.
    ActualActualIsda,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_surface::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActualIsda.name(), "ACT/ACT ISDA");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::ActualActualIsda => "ACT/ACT ISDA",
        }
    }

    /// Signed year fraction from `date1` to `date2`.
    ///
    /// Positive when `date2` is after `date1`, zero when the dates are equal
    /// and negative otherwise. Surfaces rely on the sign to detect expired
    /// options, so this never panics on reversed dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_surface::types::time::DayCountConvention;
    /// use chrono::NaiveDate;
    ///
    /// let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let b = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    ///
    /// let dc = DayCountConvention::ActualActualIsda;
    /// assert!((dc.relative_year_fraction(a, b) - 1.0).abs() < 1e-12);
    /// assert!((dc.relative_year_fraction(b, a) + 1.0).abs() < 1e-12);
    /// ```
    pub fn relative_year_fraction(&self, date1: NaiveDate, date2: NaiveDate) -> f64 {
        if date2 < date1 {
            return -self.year_fraction(date2, date1);
        }
        self.year_fraction(date1, date2)
    }

    /// Year fraction for `start <= end`.
    fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        match self {
            DayCountConvention::ActualActual365 => (end - start).num_days() as f64 / 365.0,
            DayCountConvention::ActualActual360 => (end - start).num_days() as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let d1 = if start.day() == 31 { 30 } else { start.day() };
                let d2 = if end.day() == 31 && d1 == 30 {
                    30
                } else {
                    end.day()
                };

                let days = 360 * (end.year() - start.year())
                    + 30 * (end.month() as i32 - start.month() as i32)
                    + (d2 as i32 - d1 as i32);
                days as f64 / 360.0
            }
            DayCountConvention::ActualActualIsda => {
                if start.year() == end.year() {
                    return (end - start).num_days() as f64 / days_in_year(start.year());
                }
                // Stub to the end of the first year, whole years, stub into the last year
                let first_stub = days_in_year(start.year()) - start.ordinal0() as f64;
                first_stub / days_in_year(start.year())
                    + (end.year() - start.year() - 1) as f64
                    + end.ordinal0() as f64 / days_in_year(end.year())
            }
        }
    }
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Supports multiple aliases for each convention:
    /// - ACT/365: "ACT/365", "Actual/365", "Act365", "A365", "ACT/365F"
    /// - ACT/360: "ACT/360", "Actual/360", "Act360", "A360"
    /// - 30/360: "30/360", "Thirty360", "30360"
    /// - ACT/ACT ISDA: "ACT/ACT ISDA", "ActAct", "Actual/Actual"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_'], "").as_str() {
            "ACT365" | "ACT365F" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            "ACTACTISDA" | "ACTACT" | "ACTUALACTUAL" => Ok(DayCountConvention::ActualActualIsda),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========================================
    // Year Fraction Tests
    // ========================================

    #[test]
    fn test_act_365_known_dates() {
        let yf = DayCountConvention::ActualActual365
            .relative_year_fraction(date(2024, 1, 1), date(2024, 7, 1));
        assert_relative_eq!(yf, 182.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_360_known_dates() {
        let yf = DayCountConvention::ActualActual360
            .relative_year_fraction(date(2024, 1, 1), date(2024, 7, 1));
        assert_relative_eq!(yf, 182.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thirty_360_with_31st_days() {
        let yf = DayCountConvention::Thirty360
            .relative_year_fraction(date(2024, 1, 31), date(2024, 3, 31));
        assert_relative_eq!(yf, 60.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_act_isda_across_leap_year() {
        // 2023-07-01 -> 2024-07-01: 184 days of 2023, 182 days of 2024
        let yf = DayCountConvention::ActualActualIsda
            .relative_year_fraction(date(2023, 7, 1), date(2024, 7, 1));
        assert_relative_eq!(yf, 184.0 / 365.0 + 182.0 / 366.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_act_isda_year_end_stubs() {
        // 2023-12-31 -> 2025-01-02: 1 day of 2023, all of 2024, 1 day of 2025
        let yf = DayCountConvention::ActualActualIsda
            .relative_year_fraction(date(2023, 12, 31), date(2025, 1, 2));
        assert_relative_eq!(yf, 1.0 / 365.0 + 1.0 + 1.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act_act_isda_multi_year() {
        let yf = DayCountConvention::ActualActualIsda
            .relative_year_fraction(date(2022, 1, 1), date(2025, 1, 1));
        assert_relative_eq!(yf, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_same_date_returns_zero() {
        for dc in [
            DayCountConvention::ActualActual365,
            DayCountConvention::ActualActual360,
            DayCountConvention::Thirty360,
            DayCountConvention::ActualActualIsda,
        ] {
            assert_eq!(dc.relative_year_fraction(date(2024, 5, 5), date(2024, 5, 5)), 0.0);
        }
    }

    #[test]
    fn test_reversed_dates_are_negative() {
        for dc in [
            DayCountConvention::ActualActual365,
            DayCountConvention::Thirty360,
            DayCountConvention::ActualActualIsda,
        ] {
            let fwd = dc.relative_year_fraction(date(2024, 1, 1), date(2024, 7, 1));
            let back = dc.relative_year_fraction(date(2024, 7, 1), date(2024, 1, 1));
            assert!(fwd > 0.0);
            assert_relative_eq!(back, -fwd, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_one_day_is_positive() {
        let yf = DayCountConvention::ActualActual365
            .relative_year_fraction(date(2024, 1, 1), date(2024, 1, 2));
        assert!(yf > 0.0);
    }

    // ========================================
    // Parsing and Display Tests
    // ========================================

    #[test]
    fn test_dcc_from_str() {
        assert_eq!(
            "act/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActual365
        );
        assert_eq!(
            "Actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActual360
        );
        assert_eq!(
            "30/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360
        );
        assert_eq!(
            "ACT/ACT ISDA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActualIsda
        );
    }

    #[test]
    fn test_dcc_from_str_invalid() {
        let result = "BUS/252".parse::<DayCountConvention>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("BUS/252"));
    }

    #[test]
    fn test_dcc_display_round_trip() {
        for dc in [
            DayCountConvention::ActualActual365,
            DayCountConvention::ActualActual360,
            DayCountConvention::Thirty360,
            DayCountConvention::ActualActualIsda,
        ] {
            assert_eq!(dc.to_string().parse::<DayCountConvention>().unwrap(), dc);
        }
    }
}
