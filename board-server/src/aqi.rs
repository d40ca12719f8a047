//! Air quality index derivation.
//!
//! Sub-indices follow the standard piecewise-linear breakpoint tables: each
//! pollutant has five concentration ranges mapping onto the fixed AQI
//! ranges 0–50, 51–100, 101–150, 151–200, 201–300.

use crate::sources::weather::PollutionComponents;

/// AQI range bounds shared by every pollutant table.
const AQI_BOUNDS: [f64; 11] = [
    0.0, 50.0, 51.0, 100.0, 101.0, 150.0, 151.0, 200.0, 201.0, 300.0, 301.0,
];

/// Concentration breakpoints, ppm.
pub const O3_BREAKPOINTS: [f64; 11] = [
    0.0, 0.054, 0.055, 0.070, 0.071, 0.085, 0.086, 0.105, 0.106, 0.200, 0.201,
];

/// Concentration breakpoints, µg/m³.
pub const PM25_BREAKPOINTS: [f64; 11] = [
    0.0, 9.0, 9.1, 35.4, 35.5, 55.4, 55.5, 125.4, 125.5, 225.4, 225.5,
];

/// Concentration breakpoints, µg/m³.
pub const PM10_BREAKPOINTS: [f64; 11] = [
    0.0, 54.0, 55.0, 154.0, 155.0, 254.0, 255.0, 354.0, 355.0, 424.0, 425.0,
];

/// Concentration breakpoints, ppm.
pub const CO_BREAKPOINTS: [f64; 11] = [
    0.0, 4.4, 4.5, 9.4, 9.5, 12.4, 12.5, 15.4, 15.5, 30.4, 30.5,
];

/// Concentration breakpoints, ppb.
pub const SO2_BREAKPOINTS: [f64; 11] = [
    0.0, 35.0, 36.0, 75.0, 76.0, 185.0, 186.0, 304.0, 305.0, 604.0, 605.0,
];

/// Concentration breakpoints, ppb.
pub const NO2_BREAKPOINTS: [f64; 11] = [
    0.0, 53.0, 54.0, 100.0, 101.0, 360.0, 361.0, 649.0, 650.0, 1249.0, 1250.0,
];

/// Interpolate a pollutant concentration into its AQI sub-index.
///
/// Walks the upper bound of each breakpoint pair (indices 1, 3, 5, 7, 9);
/// the first bound exceeding the concentration selects the pair to
/// interpolate within, rounded to the nearest integer. A concentration at
/// or beyond the final pair returns 0: the tables leave that range
/// uncovered.
pub fn aqi(concentration: f64, breakpoints: &[f64; 11]) -> i32 {
    let mut i = 1;
    while i < breakpoints.len() - 1 {
        if concentration < breakpoints[i] {
            let value = (AQI_BOUNDS[i] - AQI_BOUNDS[i - 1]) / (breakpoints[i] - breakpoints[i - 1])
                * (concentration - breakpoints[i - 1])
                + AQI_BOUNDS[i - 1];
            return value.round() as i32;
        }
        i += 2;
    }
    0
}

/// Per-pollutant AQI sub-indices for one pollution sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollutantIndices {
    pub co: i32,
    pub o3: i32,
    pub pm2_5: i32,
    pub pm10: i32,
    pub so2: i32,
    pub no2: i32,
}

impl PollutantIndices {
    /// The practical AQI: the worst sub-index.
    pub fn overall(&self) -> i32 {
        [self.co, self.o3, self.pm2_5, self.pm10, self.so2, self.no2]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Compute every sub-index from measured concentrations.
///
/// The source reports everything in µg/m³; CO and O3 convert to ppm and
/// SO2 and NO2 to ppb before interpolation, matching the units of their
/// breakpoint tables.
pub fn pollutant_indices(components: &PollutionComponents) -> PollutantIndices {
    PollutantIndices {
        co: aqi(components.co / 1.15 / 1000.0, &CO_BREAKPOINTS),
        o3: aqi(components.o3 / 1.96 / 1000.0, &O3_BREAKPOINTS),
        pm2_5: aqi(components.pm2_5, &PM25_BREAKPOINTS),
        pm10: aqi(components.pm10, &PM10_BREAKPOINTS),
        so2: aqi(components.so2 / 2.62, &SO2_BREAKPOINTS),
        no2: aqi(components.no2 / 1.88, &NO2_BREAKPOINTS),
    }
}

/// Collapse an AQI value into the five display bands.
pub fn band(aqi: i32) -> u8 {
    if aqi <= 50 {
        1
    } else if aqi <= 100 {
        2
    } else if aqi <= 150 {
        3
    } else if aqi <= 200 {
        4
    } else {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_within_the_matching_pair() {
        // 10.0 µg/m³ of PM2.5 lands in the 9.1–35.4 pair:
        // (100 - 51) / (35.4 - 9.1) * (10.0 - 9.1) + 51 ≈ 52.7 → 53.
        assert_eq!(aqi(10.0, &PM25_BREAKPOINTS), 53);
    }

    #[test]
    fn zero_concentration_is_zero() {
        assert_eq!(aqi(0.0, &PM25_BREAKPOINTS), 0);
        assert_eq!(aqi(0.0, &CO_BREAKPOINTS), 0);
    }

    #[test]
    fn beyond_the_last_pair_is_zero() {
        // The tables leave concentrations past the final pair unmapped.
        assert_eq!(aqi(225.5, &PM25_BREAKPOINTS), 0);
        assert_eq!(aqi(1000.0, &PM25_BREAKPOINTS), 0);
    }

    #[test]
    fn first_pair_upper_bound_maps_near_fifty() {
        assert_eq!(aqi(9.0, &PM25_BREAKPOINTS), 51);
        assert_eq!(aqi(8.99, &PM25_BREAKPOINTS), 50);
    }

    #[test]
    fn overall_takes_the_worst_sub_index() {
        let indices = PollutantIndices {
            co: 12,
            o3: 30,
            pm2_5: 53,
            pm10: 9,
            so2: 1,
            no2: 4,
        };
        assert_eq!(indices.overall(), 53);
    }

    #[test]
    fn unit_conversions_apply_before_interpolation() {
        // 201.94 µg/m³ CO ≈ 0.176 ppm, far below the first bound.
        let indices = pollutant_indices(&PollutionComponents {
            co: 201.94,
            no2: 0.77,
            o3: 68.66,
            so2: 0.64,
            pm2_5: 10.0,
            pm10: 0.54,
        });
        assert_eq!(indices.co, 2);
        assert_eq!(indices.pm2_5, 53);
        assert_eq!(indices.overall(), 53);
    }

    #[test]
    fn bands() {
        assert_eq!(band(0), 1);
        assert_eq!(band(50), 1);
        assert_eq!(band(51), 2);
        assert_eq!(band(100), 2);
        assert_eq!(band(150), 3);
        assert_eq!(band(200), 4);
        assert_eq!(band(201), 5);
        assert_eq!(band(500), 5);
    }
}
