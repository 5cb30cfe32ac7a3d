//! Host address generators.

use rand::Rng;

/// Source of candidate host addresses.
///
/// Candidates need not be unique; the network retries up to
/// `NetworkConfig::address_attempts` times until it finds a free one.
pub trait AddressGenerator: Send {
    fn next_address(&mut self) -> String;
}

/// Random dotted-quad addresses, each octet in `1..=255`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIpv4;

impl AddressGenerator for RandomIpv4 {
    fn next_address(&mut self) -> String {
        let mut rng = rand::thread_rng();
        let octets: [u8; 4] = std::array::from_fn(|_| rng.gen_range(1..=255));
        format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
    }
}

/// Deterministic `<prefix><n>` addresses, counting up from 1.
#[derive(Debug, Clone)]
pub struct Sequential {
    prefix: String,
    next: u64,
}

impl Sequential {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for Sequential {
    fn default() -> Self {
        Self::new("10.0.0.")
    }
}

impl AddressGenerator for Sequential {
    fn next_address(&mut self) -> String {
        let address = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        address
    }
}
