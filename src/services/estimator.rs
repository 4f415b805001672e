//! Offline travel-time estimate from the district named in each address
//!
//! Used for every pair the routing service can't answer. Total and
//! deterministic: same two strings, same minutes.

/// Estimate when both addresses name the same district
pub const SAME_DISTRICT_MINUTES: u32 = 25;

/// Estimate for different or unrecognised districts
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 45;

/// Seoul district labels. An address naming several is assigned the first
/// one in this order.
pub const DISTRICTS: &[&str] = &[
    "강남구", "강동구", "강북구", "강서구", "관악구",
    "광진구", "구로구", "금천구", "노원구", "도봉구",
    "동대문구", "동작구", "마포구", "서대문구", "서초구",
    "성동구", "성북구", "송파구", "양천구", "영등포구",
    "용산구", "은평구", "종로구", "중구", "중랑구",
];

/// First district label (in `DISTRICTS` order) contained in `address`
pub fn district_of(address: &str) -> Option<&'static str> {
    DISTRICTS.iter().copied().find(|d| address.contains(d))
}

/// Estimated driving minutes from `origin` to `destination`
pub fn estimate_minutes(origin: &str, destination: &str) -> u32 {
    match (district_of(origin), district_of(destination)) {
        (Some(a), Some(b)) if a == b => SAME_DISTRICT_MINUTES,
        _ => DEFAULT_ESTIMATE_MINUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_district_is_short() {
        assert_eq!(
            estimate_minutes("서울 강남구 테헤란로 123", "서울 강남구 역삼로 7"),
            SAME_DISTRICT_MINUTES
        );
    }

    #[test]
    fn test_different_districts_is_default() {
        assert_eq!(
            estimate_minutes("서울 강남구 테헤란로 123", "서울 마포구 홍익로 456"),
            DEFAULT_ESTIMATE_MINUTES
        );
    }

    #[test]
    fn test_unrecognised_address_is_default() {
        assert_eq!(estimate_minutes("부산 해운대구 1", "부산 해운대구 2"), 45);
        assert_eq!(estimate_minutes("", "서울 강남구 테헤란로 123"), 45);
        assert_eq!(estimate_minutes("", ""), 45);
    }

    #[test]
    fn test_list_order_breaks_ties() {
        // Names both 강남구 and 중구; 강남구 comes first in the list
        assert_eq!(district_of("서울 강남구 (구 중구 청사 맞은편)"), Some("강남구"));
        assert_eq!(
            estimate_minutes("서울 강남구 (구 중구 청사 맞은편)", "서울 중구 세종대로 110"),
            45
        );
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = "서울 송파구 올림픽로 300";
        let b = "서울 송파구 잠실동 40";
        assert_eq!(estimate_minutes(a, b), estimate_minutes(a, b));
        assert_eq!(estimate_minutes(a, b), 25);
    }

    #[test]
    fn test_district_of() {
        assert_eq!(district_of("서울 동대문구 왕산로 1"), Some("동대문구"));
        assert_eq!(district_of("서울 중랑구 망우로 1"), Some("중랑구"));
        assert_eq!(district_of("경기 성남시 분당구"), None);
    }
}
