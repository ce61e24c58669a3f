//! Seeded random streams, one per world concern.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

/// Deterministic bundle of RNG streams segregated by simulation domain.
///
/// Each stream is derived from the user seed and a domain tag, so adding
/// draws to one concern never shifts the sequence seen by another.
#[derive(Debug, Clone)]
pub struct RngBundle {
    seed: u64,
    quest: CountingRng<SmallRng>,
    market: CountingRng<SmallRng>,
    weather: CountingRng<SmallRng>,
    war: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            quest: CountingRng::new(derive_stream_seed(seed, b"quest")),
            market: CountingRng::new(derive_stream_seed(seed, b"market")),
            weather: CountingRng::new(derive_stream_seed(seed, b"weather")),
            war: CountingRng::new(derive_stream_seed(seed, b"war")),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed for a stream owned outside the bundle, such as the roster's.
    #[must_use]
    pub fn stream_seed(&self, domain_tag: &[u8]) -> u64 {
        derive_stream_seed(self.seed, domain_tag)
    }

    /// Outcome and wear draws for quest attempts.
    pub const fn quest(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.quest
    }

    /// Weekday draws for purchases.
    pub const fn market(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.market
    }

    pub const fn weather(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.weather
    }

    pub const fn war(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.war
    }

    /// Draws consumed per stream, in `quest, market, weather, war` order.
    #[must_use]
    pub const fn draws(&self) -> [u64; 4] {
        [
            self.quest.draws(),
            self.market.draws(),
            self.weather.draws(),
            self.war.draws(),
        ]
    }
}

/// Counting wrapper for RNG streams.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so the fallback is never taken.
    Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).map_or(user_seed, |mut mac| {
        mac.update(domain_tag);
        let digest = mac.finalize().into_bytes();
        let mut seed_bytes = [0_u8; 8];
        seed_bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(seed_bytes)
    })
}
