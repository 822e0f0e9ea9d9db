use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Player-selected game speed, applied as a multiplier to each level's base
/// tick interval
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// The interval multiplier, in tenths
    fn tenths(self) -> u64 {
        match self {
            Speed::Slow => 16,
            Speed::Normal => 10,
            Speed::Fast => 6,
        }
    }

    /// Scale a level's base tick interval by this speed's multiplier,
    /// rounding to the nearest millisecond (halves round up)
    pub(crate) fn scale(self, base: Duration) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let ms = base_ms.saturating_mul(self.tenths()).saturating_add(5) / 10;
        Duration::from_millis(ms)
    }

    pub(crate) fn description(self) -> &'static str {
        match self {
            Speed::Slow => "Relaxed pace",
            Speed::Normal => "Default speed",
            Speed::Fast => "Challenge mode",
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }

    /// Step to the next faster setting, if any
    pub(crate) fn increase(&mut self) {
        match self {
            Speed::Slow => *self = Speed::Normal,
            Speed::Normal => *self = Speed::Fast,
            Speed::Fast => (),
        }
    }

    /// Step to the next slower setting, if any
    pub(crate) fn decrease(&mut self) {
        match self {
            Speed::Slow => (),
            Speed::Normal => *self = Speed::Slow,
            Speed::Fast => *self = Speed::Normal,
        }
    }

    pub(crate) fn can_increase(self) -> bool {
        self != Speed::Fast
    }

    pub(crate) fn can_decrease(self) -> bool {
        self != Speed::Slow
    }

    /// Render the setting with arrows indicating which adjustments are
    /// possible
    pub(crate) fn to_selector(self) -> String {
        format!(
            "{left} {name:^6} {right}",
            left = if self.can_decrease() { '◀' } else { '◁' },
            name = self.as_str(),
            right = if self.can_increase() { '▶' } else { '▷' }
        )
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use rstest::rstest;

    #[rstest]
    #[case(Speed::Slow, 150, 240)]
    #[case(Speed::Normal, 150, 150)]
    #[case(Speed::Fast, 150, 90)]
    #[case(Speed::Slow, 130, 208)]
    #[case(Speed::Fast, 110, 66)]
    #[case(Speed::Fast, 125, 75)]
    #[case(Speed::Slow, 101, 162)]
    fn test_scale(#[case] speed: Speed, #[case] base: u64, #[case] scaled: u64) {
        assert_eq!(
            speed.scale(Duration::from_millis(base)),
            Duration::from_millis(scaled)
        );
    }

    #[test]
    fn selectors_line_up() {
        let widths = Speed::iter()
            .map(|sp| sp.to_selector().chars().count())
            .collect::<Vec<_>>();
        assert_eq!(widths, vec![10; 3]);
    }

    #[test]
    fn adjust() {
        let mut speed = Speed::default();
        speed.decrease();
        assert_eq!(speed, Speed::Slow);
        speed.decrease();
        assert_eq!(speed, Speed::Slow);
        speed.increase();
        speed.increase();
        assert_eq!(speed, Speed::Fast);
        assert!(!speed.can_increase());
    }

    #[test]
    fn deserialize() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            speed: Speed,
        }
        let w: Wrapper = toml::from_str("speed = \"fast\"").unwrap();
        assert_eq!(w.speed, Speed::Fast);
    }
}
