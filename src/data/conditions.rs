//! weatherapi.com condition codes
//!
//! Maps the provider's numeric condition codes to display icons and condition
//! text. Both mappings are total: unknown codes fall back to the sunny variant.

use serde::{Serialize, Serializer};

/// Icon shown for a weather condition
///
/// Serializes as its asset identifier, see [`ConditionIcon::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionIcon {
    Sunny,
    ClearNight,
    PartlyCloudy,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    RainSun,
    RainNight,
    Snow,
    Sleet,
    ScatteredThunderstorm,
    SevereThunderstorm,
    BlowingSnow,
    Blizzard,
    DrizzleSun,
    DrizzleNight,
    Drizzle,
    Rain,
    HeavyRain,
    Hail,
    RainThunderstorm,
    ScatteredShowers,
    ScatteredShowersNight,
}

impl ConditionIcon {
    /// Stable identifier of the icon asset
    pub fn id(self) -> &'static str {
        match self {
            ConditionIcon::Sunny => "ic_sunny",
            ConditionIcon::ClearNight => "ic_clear_night",
            ConditionIcon::PartlyCloudy => "ic_partly_cloudy",
            ConditionIcon::PartlyCloudyNight => "ic_partly_cloudy_night",
            ConditionIcon::Cloudy => "ic_cloudy",
            ConditionIcon::Fog => "ic_fog",
            ConditionIcon::RainSun => "ic_rain_sun",
            ConditionIcon::RainNight => "ic_rain_night",
            ConditionIcon::Snow => "ic_snow",
            ConditionIcon::Sleet => "ic_sleet",
            ConditionIcon::ScatteredThunderstorm => "ic_scattered_thunderstorm",
            ConditionIcon::SevereThunderstorm => "ic_severe_thunderstorm",
            ConditionIcon::BlowingSnow => "ic_blowing_snow",
            ConditionIcon::Blizzard => "ic_blizzard",
            ConditionIcon::DrizzleSun => "ic_drizzle_sun",
            ConditionIcon::DrizzleNight => "ic_drizzle_night",
            ConditionIcon::Drizzle => "ic_drizzle",
            ConditionIcon::Rain => "ic_rain",
            ConditionIcon::HeavyRain => "ic_heavy_rain",
            ConditionIcon::Hail => "ic_hail",
            ConditionIcon::RainThunderstorm => "ic_rain_thunderstorm",
            ConditionIcon::ScatteredShowers => "ic_scattered_showers",
            ConditionIcon::ScatteredShowersNight => "ic_scattered_showers_night",
        }
    }

    /// Terminal symbol used by the text report
    pub fn glyph(self) -> &'static str {
        match self {
            ConditionIcon::Sunny => "☀",
            ConditionIcon::ClearNight => "☾",
            ConditionIcon::PartlyCloudy | ConditionIcon::PartlyCloudyNight => "⛅",
            ConditionIcon::Cloudy => "☁",
            ConditionIcon::Fog => "🌫",
            ConditionIcon::RainSun
            | ConditionIcon::RainNight
            | ConditionIcon::Rain
            | ConditionIcon::ScatteredShowers
            | ConditionIcon::ScatteredShowersNight => "🌦",
            ConditionIcon::HeavyRain => "🌧",
            ConditionIcon::Drizzle | ConditionIcon::DrizzleSun | ConditionIcon::DrizzleNight => "☂",
            ConditionIcon::Snow | ConditionIcon::BlowingSnow | ConditionIcon::Blizzard => "❄",
            ConditionIcon::Sleet | ConditionIcon::Hail => "🌨",
            ConditionIcon::ScatteredThunderstorm
            | ConditionIcon::SevereThunderstorm
            | ConditionIcon::RainThunderstorm => "⛈",
        }
    }
}

impl Serialize for ConditionIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Map a provider condition code to its display icon
///
/// Only sunny/clear, partly cloudy, patchy rain, thundery outbreaks, patchy
/// drizzle and light showers have distinct night icons.
pub fn condition_icon(code: i64, is_day: bool) -> ConditionIcon {
    use ConditionIcon::*;

    let day_or_night = |day: ConditionIcon, night: ConditionIcon| if is_day { day } else { night };

    match code {
        1000 => day_or_night(Sunny, ClearNight),
        1003 => day_or_night(PartlyCloudy, PartlyCloudyNight),
        1006 | 1009 => Cloudy,
        1030 | 1135 | 1147 => Fog,
        1063 | 1180 => day_or_night(RainSun, RainNight),
        1066 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => Snow,
        1069 | 1204 | 1207 | 1249 | 1252 => Sleet,
        1087 => day_or_night(ScatteredThunderstorm, SevereThunderstorm),
        1114 => BlowingSnow,
        1117 => Blizzard,
        1150 => day_or_night(DrizzleSun, DrizzleNight),
        1053 | 1072 | 1168 | 1171 => Drizzle,
        1183 | 1186 => Rain,
        1189 | 1192 | 1195 | 1246 => HeavyRain,
        1198 | 1201 | 1237 | 1261 | 1264 => Hail,
        1273 | 1276 => RainThunderstorm,
        1279 | 1282 => SevereThunderstorm,
        1240 | 1243 => day_or_night(ScatteredShowers, ScatteredShowersNight),
        _ => Sunny,
    }
}

/// Map a provider condition code to its English condition text
pub fn condition_text(code: i64, is_day: bool) -> &'static str {
    match code {
        1000 if is_day => "Sunny",
        1000 => "Clear",
        1003 => "Partly cloudy",
        1006 => "Cloudy",
        1009 => "Overcast",
        1030 => "Mist",
        1063 => "Patchy rain nearby",
        1066 => "Patchy snow nearby",
        1069 => "Patchy sleet nearby",
        1072 => "Patchy freezing drizzle nearby",
        1087 => "Thundery outbreaks in nearby",
        1114 => "Blowing snow",
        1117 => "Blizzard",
        1135 => "Fog",
        1147 => "Freezing fog",
        1150 => "Patchy light drizzle",
        1153 => "Light drizzle",
        1168 => "Freezing drizzle",
        1171 => "Heavy freezing drizzle",
        1180 => "Patchy light rain",
        1183 => "Light rain",
        1186 => "Moderate rain at times",
        1189 => "Moderate rain",
        1192 => "Heavy rain at times",
        1195 => "Heavy rain",
        1198 => "Light freezing rain",
        1201 => "Moderate or heavy freezing rain",
        1204 => "Light sleet",
        1207 => "Moderate or heavy sleet",
        1210 => "Patchy light snow",
        1213 => "Light snow",
        1216 => "Patchy moderate snow",
        1219 => "Moderate snow",
        1222 => "Patchy heavy snow",
        1225 => "Heavy snow",
        1237 => "Ice pellets",
        1240 => "Light rain shower",
        1243 => "Moderate or heavy rain shower",
        1246 => "Torrential rain shower",
        1249 => "Light sleet showers",
        1252 => "Moderate or heavy sleet showers",
        1255 => "Light snow showers",
        1258 => "Moderate or heavy snow showers",
        1261 => "Light showers of ice pellets",
        1264 => "Moderate or heavy showers of ice pellets",
        1273 => "Patchy light rain in area with thunder",
        1276 => "Moderate or heavy rain in area with thunder",
        1279 => "Patchy light snow in area with thunder",
        1282 => "Moderate or heavy snow in area with thunder",
        _ => "Sunny",
    }
}
