//! Sun and moon display derivations.

/// Dial color while the sun is up.
pub const DAY_COLOR: &str = "#00C6FF";

/// Dial color between sunset and sunrise.
pub const NIGHT_COLOR: &str = "#303030";

/// Dial color in the windows just before sunset and sunrise.
pub const TWILIGHT_COLOR: &str = "#FF5A36";

const SECONDS_PER_DAY: i64 = 86_400;

/// A position on the sundial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDial {
    /// Rotation in degrees: solar noon renders at 0°.
    pub rotation: f64,
    pub color: &'static str,
}

/// Map the current moment onto the sundial.
///
/// The dial is a full day: 0–180° spans sunrise→sunset and 180–360° spans
/// sunset→next sunrise. Before today's sunrise the night arc is anchored on
/// yesterday's sunset, estimated as today's sunset minus one day. A fixed
/// −90° offset puts solar noon at the top of the dial; the twilight accent
/// takes over within five degrees of the sunset (90°) and sunrise (270°)
/// marks. All arguments are unix seconds.
pub fn sundial(now: i64, sunrise: i64, sunset: i64, tomorrow_sunrise: i64) -> SunDial {
    let (mut rotation, mut color);

    if now > sunrise && now < sunset {
        let daylight = (sunset - sunrise) as f64;
        rotation = 180.0 * (now - sunrise) as f64 / daylight;
        color = DAY_COLOR;
    } else if now >= sunset {
        let night = (tomorrow_sunrise - sunset) as f64;
        rotation = 180.0 * (now - sunset) as f64 / night + 180.0;
        color = NIGHT_COLOR;
    } else {
        let yesterday_sunset = sunset - SECONDS_PER_DAY;
        let night = (sunrise - yesterday_sunset) as f64;
        rotation = 180.0 * (now - yesterday_sunset) as f64 / night + 180.0;
        color = NIGHT_COLOR;
    }

    rotation -= 90.0;

    if (85.0..90.0).contains(&rotation) || (265.0..270.0).contains(&rotation) {
        color = TWILIGHT_COLOR;
    }

    SunDial { rotation, color }
}

/// Integer moon phase position on the 28-step cycle.
pub fn moon_phase_index(phase: f64) -> i64 {
    (phase * 28.0) as i64
}

/// Icon identifier for a moon phase index.
///
/// The index is taken modulo 28; anything outside the table falls back to
/// the new moon.
pub fn moon_icon(index: i64) -> &'static str {
    match index % 28 {
        1 => "wi-moon-waxing-crescent-1",
        2 => "wi-moon-waxing-crescent-2",
        3 => "wi-moon-waxing-crescent-3",
        4 => "wi-moon-waxing-crescent-4",
        5 => "wi-moon-waxing-crescent-5",
        6 => "wi-moon-waxing-crescent-6",
        7 => "wi-moon-first-quarter",
        8 => "wi-moon-waxing-gibbous-1",
        9 => "wi-moon-waxing-gibbous-2",
        10 => "wi-moon-waxing-gibbous-3",
        11 => "wi-moon-waxing-gibbous-4",
        12 => "wi-moon-waxing-gibbous-5",
        13 => "wi-moon-waxing-gibbous-6",
        14 => "wi-moon-full",
        15 => "wi-moon-waning-gibbous-1",
        16 => "wi-moon-waning-gibbous-2",
        17 => "wi-moon-waning-gibbous-3",
        18 => "wi-moon-waning-gibbous-4",
        19 => "wi-moon-waning-gibbous-5",
        20 => "wi-moon-waning-gibbous-6",
        21 => "wi-moon-third-quarter",
        22 => "wi-moon-waning-crescent-1",
        23 => "wi-moon-waning-crescent-2",
        24 => "wi-moon-waning-crescent-3",
        25 => "wi-moon-waning-crescent-4",
        26 => "wi-moon-waning-crescent-5",
        27 => "wi-moon-waning-crescent-6",
        _ => "wi-moon-new",
    }
}
