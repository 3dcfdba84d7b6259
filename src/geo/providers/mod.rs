mod freegeoip;

pub use freegeoip::FreeGeoIpLocator;
