//! Date/time parsing
//!
//! Directory records carry a 7-byte binary recording timestamp.

/// 7-byte directory record datetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime7 {
    /// Years since 1900
    pub year: u8,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,

    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-59)
    pub second: u8,

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl DateTime7 {
    /// Parse from 7-byte array
    pub fn from_bytes(bytes: &[u8; 7]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
            gmt_offset: bytes[6] as i8,
        }
    }

    /// Get full year (1900 + year)
    pub fn full_year(&self) -> u16 {
        1900 + self.year as u16
    }

    /// Are all fields within their documented ranges?
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
            && (-48..=52).contains(&self.gmt_offset)
    }

    /// Seconds since the Unix epoch (UTC), `None` for an invalid timestamp
    pub fn to_unix_timestamp(&self) -> Option<i64> {
        if !self.is_valid() {
            return None;
        }

        let days = days_from_civil(
            self.full_year() as i64,
            self.month as i64,
            self.day as i64,
        );
        let local = days * 86_400
            + self.hour as i64 * 3_600
            + self.minute as i64 * 60
            + self.second as i64;

        Some(local - self.gmt_offset as i64 * 15 * 60)
    }
}

/// Days between 1970-01-01 and the given proleptic Gregorian date
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
