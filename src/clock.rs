//! Wall-clock sampling and hand angles

use chrono::{Local, Timelike};

/// Time of day as read for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    /// 0..=23
    pub hour: u32,
    /// 0..=59
    pub minute: u32,
    /// 0..=59
    pub second: u32,
    /// 0..=999
    pub millisecond: u32,
}

impl ClockTime {
    /// Build a time, clamping each field into its valid range
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            millisecond: millisecond.min(999),
        }
    }

    /// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.mmm`
    pub fn parse(s: &str) -> Result<Self, String> {
        let (hms, millis) = match s.split_once('.') {
            Some((hms, ms)) => (hms, Some(ms)),
            None => (s, None),
        };

        let mut fields = hms.split(':');
        let mut next = |name: &str, max: u32| -> Result<u32, String> {
            match fields.next() {
                Some(v) => parse_field(v, name, max),
                None => Ok(0),
            }
        };
        let hour = next("hour", 23)?;
        let minute = next("minute", 59)?;
        let second = next("second", 59)?;
        if fields.next().is_some() {
            return Err(format!("Invalid time: {}", s));
        }
        let colons = hms.matches(':').count();
        if colons == 0 {
            return Err(format!("Invalid time: {} (expected HH:MM[:SS[.mmm]])", s));
        }

        let millisecond = match millis {
            Some(_) if colons < 2 => {
                return Err(format!("Invalid time: {} (fraction needs seconds)", s));
            }
            Some(fraction) => parse_fraction(fraction)?,
            None => 0,
        };

        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }
}

fn parse_field(value: &str, name: &str, max: u32) -> Result<u32, String> {
    let n: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {}: {:?}", name, value))?;
    if n > max {
        return Err(format!("{} out of range: {} > {}", name, n, max));
    }
    Ok(n)
}

/// Decimal fraction of a second, `5` meaning 500 ms
fn parse_fraction(fraction: &str) -> Result<u32, String> {
    if fraction.is_empty()
        || fraction.len() > 3
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(format!("Invalid fraction of a second: {:?}", fraction));
    }
    let digits: u32 = fraction.parse().map_err(|e| format!("{}", e))?;
    Ok(digits * 10u32.pow(3 - fraction.len() as u32))
}

/// Source of the current time; swapped out in tests
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

/// Local time from the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> ClockTime {
        let now = Local::now();
        // Leap seconds show up as nanosecond >= 1e9
        ClockTime::new(
            now.hour(),
            now.minute(),
            now.second(),
            now.nanosecond() / 1_000_000,
        )
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockTime);

impl TimeSource for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}

/// Hand rotations in degrees, clockwise from 12 o'clock, in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn from_time(time: &ClockTime) -> Self {
        let hour = 30.0 * (time.hour % 12) as f32 + 0.5 * time.minute as f32;
        let minute = 6.0 * time.minute as f32;
        let second = 6.0 * time.second as f32 + (360.0 / 60000.0) * time.millisecond as f32;

        Self {
            hour: normalize_degrees(hour),
            minute: normalize_degrees(minute),
            second: normalize_degrees(second),
        }
    }
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles(h: u32, m: u32, s: u32, ms: u32) -> HandAngles {
        HandAngles::from_time(&ClockTime::new(h, m, s, ms))
    }

    #[test]
    fn test_three_oclock() {
        let a = angles(3, 0, 0, 0);
        assert_eq!(a.hour, 90.0);
        assert_eq!(a.minute, 0.0);
        assert_eq!(a.second, 0.0);
    }

    #[test]
    fn test_half_past_midnight() {
        let a = angles(0, 30, 0, 0);
        assert_eq!(a.hour, 15.0);
        assert_eq!(a.minute, 180.0);
        assert_eq!(a.second, 0.0);
    }

    #[test]
    fn test_afternoon_wraps_to_twelve_hour_dial() {
        assert_eq!(angles(15, 0, 0, 0), angles(3, 0, 0, 0));
        assert_eq!(angles(12, 0, 0, 0).hour, 0.0);
    }

    #[test]
    fn test_milliseconds_advance_second_hand() {
        let a = angles(0, 0, 10, 500);
        assert!((a.second - 63.0).abs() < 1e-4);
    }

    #[test]
    fn test_all_angles_within_range() {
        for h in 0..24 {
            for m in 0..60 {
                let a = angles(h, m, 59, 999);
                let expected_hour = 30.0 * (h % 12) as f32 + 0.5 * m as f32;
                assert!((a.hour - expected_hour).abs() < 1e-3);
                assert_eq!(a.minute, 6.0 * m as f32);
                for v in [a.hour, a.minute, a.second] {
                    assert!((0.0..360.0).contains(&v), "{} out of range", v);
                }
            }
        }
        for s in 0..60 {
            for ms in [0, 1, 250, 999] {
                let a = angles(0, 0, s, ms);
                let expected = 6.0 * s as f32 + 0.006 * ms as f32;
                assert!((a.second - expected).abs() < 1e-3);
                assert!(a.second < 360.0);
            }
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-7), 0.0);
    }

    #[test]
    fn test_new_clamps_fields() {
        let t = ClockTime::new(30, 75, 61, 5000);
        assert_eq!(t, ClockTime::new(23, 59, 59, 999));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(ClockTime::parse("03:00").unwrap(), ClockTime::new(3, 0, 0, 0));
        assert_eq!(
            ClockTime::parse("10:08:42").unwrap(),
            ClockTime::new(10, 8, 42, 0)
        );
        assert_eq!(
            ClockTime::parse("23:59:59.999").unwrap(),
            ClockTime::new(23, 59, 59, 999)
        );
        assert_eq!(
            ClockTime::parse("10:08:42.5").unwrap(),
            ClockTime::new(10, 8, 42, 500)
        );
        assert_eq!(
            ClockTime::parse("10:08:42.05").unwrap(),
            ClockTime::new(10, 8, 42, 50)
        );
        assert_eq!(
            ClockTime::parse("10:08:42.007").unwrap(),
            ClockTime::new(10, 8, 42, 7)
        );
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
        assert!(ClockTime::parse("12").is_err());
        assert!(ClockTime::parse("1:2:3:4").is_err());
        assert!(ClockTime::parse("aa:bb").is_err());
        assert!(ClockTime::parse("12:00:00.1000").is_err());
        assert!(ClockTime::parse("12:00.250").is_err());
        assert!(ClockTime::parse("12:00:00.").is_err());
        assert!(ClockTime::parse("12:00:00.-5").is_err());
        assert!(ClockTime::parse("12:00:00. 5").is_err());
    }

    #[test]
    fn test_system_clock_in_range() {
        let t = SystemClock.now();
        assert!(t.hour < 24 && t.minute < 60 && t.second < 60 && t.millisecond < 1000);
    }
}
