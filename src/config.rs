use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

/// Longest horizon accepted from outside callers; the series holds one point per year.
pub const MAX_PLAN_YEARS: u32 = 100;

/// Highest annual rate accepted from outside callers. Growth stays within f64
/// range up to `MAX_PLAN_YEARS` at this rate.
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Calculator inputs used when a request leaves a field out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanDefaults {
    pub target_amount: f64,
    pub years: u32,
    pub annual_rate_percent: f64,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            target_amount: 10_000_000.0,
            years: 20,
            annual_rate_percent: 12.0,
        }
    }
}
