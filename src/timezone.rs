use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use super::get_local_offset;

    #[test]
    fn known_timezone_resolves() {
        assert!(get_local_offset("Asia/Manila").is_some());
        assert!(get_local_offset("Etc/UTC").is_some());
    }

    #[test]
    fn unknown_timezone_is_none() {
        assert!(get_local_offset("Not/ARealPlace").is_none());
    }
}
