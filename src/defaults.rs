pub const DEFAULT_GEOCODE_URL: &str =
    "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode";

pub const DEFAULT_DIRECTIONS_URL: &str =
    "https://naveropenapi.apigw.ntruss.com/map-direction/v1/driving";

pub const DEFAULT_ROUTE_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_MATRIX_CONCURRENCY: usize = 1;
