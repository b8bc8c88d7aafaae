//! Pool registry: creates pools and owns the protocol fee settings.

use std::collections::HashMap;
use std::sync::Arc;

use sha3::{Digest, Keccak256};

use crate::config::RegistryConfig;
#[cfg(feature = "multi-outcome")]
use crate::config::MultiOutcomeConfig;
use crate::domain::{Address, CallContext, RegistryEvent, TokenPair};
use crate::error::{AmmError, Result};
#[cfg(feature = "multi-outcome")]
use crate::pools::MultiOutcomePool;
use crate::pools::Pair;
use crate::traits::{Exchange, FeeSource};

const PAIR_TAG: &[u8] = b"outcome-amm/pair";
#[cfg(feature = "multi-outcome")]
const MARKET_TAG: &[u8] = b"outcome-amm/market";

fn derive_address(tag: &[u8], registry: Address, members: &[Address]) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(tag);
    hasher.update(registry);
    for member in members {
        hasher.update(member);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Address::from_bytes(bytes)
}

/// Deterministic address of the pair for `tokens` created by `registry`.
///
/// Depends only on the registry and the canonical pair, so it is known
/// before the pair exists and is the same for either argument order.
///
/// ```rust
/// use outcome_amm::domain::{Address, TokenPair};
/// use outcome_amm::factory::pair_address;
///
/// let registry = Address::from_bytes([0xee; 32]);
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
/// let forward = TokenPair::new(x, y).expect("distinct");
/// let backward = TokenPair::new(y, x).expect("distinct");
/// assert_eq!(pair_address(registry, &forward), pair_address(registry, &backward));
/// ```
#[must_use]
pub fn pair_address(registry: Address, tokens: &TokenPair) -> Address {
    derive_address(PAIR_TAG, registry, &[tokens.first(), tokens.second()])
}

/// Deterministic address of the multi-outcome pool for `reference` and
/// the sorted `outcomes`.
#[cfg(feature = "multi-outcome")]
#[must_use]
pub fn market_pool_address(registry: Address, reference: Address, outcomes: &[Address]) -> Address {
    let members: Vec<Address> = std::iter::once(reference)
        .chain(outcomes.iter().copied())
        .collect();
    derive_address(MARKET_TAG, registry, &members)
}

/// Creates pools, indexes them, and administers the protocol fee.
///
/// Every pair is reachable under both token orders and by creation index.
/// The registry is the [`FeeSource`] handed to pair liquidity operations,
/// so changing the fee recipient takes effect on the next mint or burn.
///
/// # Example
///
/// ```rust
/// use outcome_amm::config::RegistryConfig;
/// use outcome_amm::domain::Address;
/// use outcome_amm::error::AmmError;
/// use outcome_amm::factory::PoolRegistry;
///
/// let config = RegistryConfig::new(
///     Address::from_bytes([0xee; 32]),
///     Address::from_bytes([0xad; 32]),
/// )
/// .expect("valid");
/// let mut registry = PoolRegistry::from_config(&config).expect("registry");
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
/// let pair = registry.create_pair(y, x).expect("created");
/// assert_eq!(registry.get_pair(x, y).map(|p| p.address()), Some(pair.address()));
/// assert_eq!(registry.create_pair(x, y).err(), Some(AmmError::PairExists));
/// ```
#[derive(Debug)]
pub struct PoolRegistry {
    address: Address,
    fee_authority: Address,
    fee_recipient: Option<Address>,
    pairs: HashMap<(Address, Address), Arc<Pair>>,
    all_pairs: Vec<Arc<Pair>>,
    #[cfg(feature = "multi-outcome")]
    market_pools: HashMap<(Address, Vec<Address>), Arc<MultiOutcomePool>>,
    #[cfg(feature = "multi-outcome")]
    all_market_pools: Vec<Arc<MultiOutcomePool>>,
    events: Vec<RegistryEvent>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            fee_authority: config.fee_authority(),
            fee_recipient: config.fee_recipient(),
            pairs: HashMap::new(),
            all_pairs: Vec::new(),
            #[cfg(feature = "multi-outcome")]
            market_pools: HashMap::new(),
            #[cfg(feature = "multi-outcome")]
            all_market_pools: Vec::new(),
            events: Vec::new(),
        })
    }

    /// The registry's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The only caller allowed to change fee settings.
    #[must_use]
    pub const fn fee_authority(&self) -> Address {
        self.fee_authority
    }

    /// Creates and initializes the pair for two tokens, in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAddresses`] if `token_x == token_y`.
    /// - [`AmmError::ZeroAddress`] if either token is null.
    /// - [`AmmError::PairExists`] if the pair was already created.
    pub fn create_pair(&mut self, token_x: Address, token_y: Address) -> Result<Arc<Pair>> {
        let tokens = TokenPair::new(token_x, token_y)?;
        let (token0, token1) = (tokens.first(), tokens.second());
        if self.pairs.contains_key(&(token0, token1)) {
            return Err(AmmError::PairExists);
        }

        let address = pair_address(self.address, &tokens);
        let pair = Pair::new(address, self.address);
        pair.initialize(&CallContext::new(self.address, 0), token0, token1)?;
        let pair = Arc::new(pair);

        self.pairs.insert((token0, token1), Arc::clone(&pair));
        self.pairs.insert((token1, token0), Arc::clone(&pair));
        self.all_pairs.push(Arc::clone(&pair));
        let pair_count = self.all_pairs.len();
        self.events.push(RegistryEvent::PairCreated {
            token0,
            token1,
            pair: address,
            pair_count,
        });
        tracing::info!(
            registry = %self.address,
            token0 = %token0,
            token1 = %token1,
            pair = %address,
            pair_count,
            "pair created"
        );
        Ok(pair)
    }

    /// The pair for two tokens, in either order.
    #[must_use]
    pub fn get_pair(&self, token_x: Address, token_y: Address) -> Option<Arc<Pair>> {
        self.pairs.get(&(token_x, token_y)).cloned()
    }

    /// The pair created `index`-th, starting at zero.
    #[must_use]
    pub fn pair_at(&self, index: usize) -> Option<Arc<Pair>> {
        self.all_pairs.get(index).cloned()
    }

    /// Number of pairs created so far.
    #[must_use]
    pub fn all_pairs_len(&self) -> usize {
        self.all_pairs.len()
    }

    /// Turns the protocol fee on (`Some`) or off (`None`).
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the fee authority.
    /// - [`AmmError::ZeroAddress`] for a null recipient.
    pub fn set_fee_recipient(&mut self, caller: Address, recipient: Option<Address>) -> Result<()> {
        self.authorize(caller)?;
        if recipient.is_some_and(|r| r.is_zero()) {
            return Err(AmmError::ZeroAddress);
        }
        let previous = std::mem::replace(&mut self.fee_recipient, recipient);
        self.events.push(RegistryEvent::FeeRecipientChanged {
            previous,
            current: recipient,
        });
        tracing::info!(
            registry = %self.address,
            previous = ?previous,
            current = ?recipient,
            "fee recipient changed"
        );
        Ok(())
    }

    /// Hands fee administration to `authority`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] unless `caller` is the fee authority.
    /// - [`AmmError::ZeroAddress`] if `authority` is null, which would lock
    ///   the fee settings forever.
    pub fn set_fee_authority(&mut self, caller: Address, authority: Address) -> Result<()> {
        self.authorize(caller)?;
        if authority.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        let previous = std::mem::replace(&mut self.fee_authority, authority);
        self.events.push(RegistryEvent::FeeAuthorityChanged {
            previous,
            current: authority,
        });
        tracing::info!(
            registry = %self.address,
            previous = %previous,
            current = %authority,
            "fee authority changed"
        );
        Ok(())
    }

    fn authorize(&self, caller: Address) -> Result<()> {
        if caller != self.fee_authority {
            tracing::warn!(registry = %self.address, caller = %caller, "fee change refused");
            return Err(AmmError::Unauthorized("caller is not the fee authority"));
        }
        Ok(())
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(feature = "multi-outcome")]
impl PoolRegistry {
    /// Creates the multi-outcome pool for a market.
    ///
    /// Pools are keyed by the reference asset and the set of outcomes;
    /// the precision does not distinguish two markets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid.
    /// - [`AmmError::PairExists`] if the market already has a pool.
    pub fn create_market_pool(&mut self, config: MultiOutcomeConfig) -> Result<Arc<MultiOutcomePool>> {
        config.validate()?;
        let key = (config.reference(), config.outcomes().to_vec());
        if self.market_pools.contains_key(&key) {
            return Err(AmmError::PairExists);
        }

        let address = market_pool_address(self.address, config.reference(), config.outcomes());
        let pool = Arc::new(MultiOutcomePool::new(
            &CallContext::new(self.address, 0),
            address,
            self.address,
            &config,
        )?);
        self.market_pools.insert(key, Arc::clone(&pool));
        self.all_market_pools.push(Arc::clone(&pool));
        let pool_count = self.all_market_pools.len();
        self.events.push(RegistryEvent::MarketPoolCreated {
            reference: config.reference(),
            outcomes: config.outcomes().to_vec(),
            pool: address,
            pool_count,
        });
        tracing::info!(
            registry = %self.address,
            reference = %config.reference(),
            outcomes = config.outcomes().len(),
            pool = %address,
            pool_count,
            "market pool created"
        );
        Ok(pool)
    }

    /// The pool for `reference` and `outcomes`, in any order.
    #[must_use]
    pub fn get_market_pool(
        &self,
        reference: Address,
        outcomes: &[Address],
    ) -> Option<Arc<MultiOutcomePool>> {
        let mut sorted = outcomes.to_vec();
        sorted.sort_unstable();
        self.market_pools.get(&(reference, sorted)).cloned()
    }

    /// The multi-outcome pool created `index`-th, starting at zero.
    #[must_use]
    pub fn market_pool_at(&self, index: usize) -> Option<Arc<MultiOutcomePool>> {
        self.all_market_pools.get(index).cloned()
    }

    /// Number of multi-outcome pools created so far.
    #[must_use]
    pub fn all_market_pools_len(&self) -> usize {
        self.all_market_pools.len()
    }
}

impl FeeSource for PoolRegistry {
    fn fee_recipient(&self) -> Option<Address> {
        self.fee_recipient
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const REGISTRY: Address = Address::from_bytes([0xee; 32]);
    const AUTHORITY: Address = Address::from_bytes([0xad; 32]);
    const MALLORY: Address = Address::from_bytes([0x66; 32]);
    const FEE_TO: Address = Address::from_bytes([0xf0; 32]);
    const X: Address = Address::from_bytes([1u8; 32]);
    const Y: Address = Address::from_bytes([2u8; 32]);
    const Z: Address = Address::from_bytes([3u8; 32]);

    fn registry() -> PoolRegistry {
        let Ok(config) = RegistryConfig::new(REGISTRY, AUTHORITY) else {
            panic!("expected Ok");
        };
        let Ok(registry) = PoolRegistry::from_config(&config) else {
            panic!("expected Ok");
        };
        registry
    }

    #[test]
    fn pair_reachable_in_both_orders() {
        let mut registry = registry();
        let Ok(pair) = registry.create_pair(Y, X) else {
            panic!("expected Ok");
        };
        let Ok(tokens) = TokenPair::new(X, Y) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.address(), pair_address(REGISTRY, &tokens));
        assert_eq!(pair.registry(), REGISTRY);
        for (a, b) in [(X, Y), (Y, X)] {
            let Some(found) = registry.get_pair(a, b) else {
                panic!("expected pair");
            };
            assert!(Arc::ptr_eq(&found, &pair));
        }
        let Ok(tokens) = pair.tokens() else {
            panic!("expected Ok");
        };
        assert_eq!((tokens.first(), tokens.second()), (X, Y));
    }

    #[test]
    fn duplicate_and_degenerate_pairs_rejected() {
        let mut registry = registry();
        let Ok(_) = registry.create_pair(X, Y) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.create_pair(Y, X).err(), Some(AmmError::PairExists));
        assert_eq!(registry.create_pair(X, X).err(), Some(AmmError::IdenticalAddresses));
        assert_eq!(
            registry.create_pair(X, Address::zero()).err(),
            Some(AmmError::ZeroAddress)
        );
        assert_eq!(registry.all_pairs_len(), 1);
    }

    #[test]
    fn pairs_indexed_in_creation_order() {
        let mut registry = registry();
        let Ok(first) = registry.create_pair(X, Y) else {
            panic!("expected Ok");
        };
        let Ok(second) = registry.create_pair(Z, X) else {
            panic!("expected Ok");
        };
        assert_ne!(first.address(), second.address());
        assert_eq!(registry.pair_at(0).map(|p| p.address()), Some(first.address()));
        assert_eq!(registry.pair_at(1).map(|p| p.address()), Some(second.address()));
        assert!(registry.pair_at(2).is_none());

        let events = registry.drain_events();
        let Some(RegistryEvent::PairCreated { pair_count, token0, .. }) = events.last() else {
            panic!("expected PairCreated");
        };
        assert_eq!((*pair_count, *token0), (2, X));
        assert!(registry.drain_events().is_empty());
    }

    #[test]
    fn pair_address_depends_on_registry() {
        let Ok(tokens) = TokenPair::new(X, Y) else {
            panic!("expected Ok");
        };
        assert_ne!(pair_address(REGISTRY, &tokens), pair_address(AUTHORITY, &tokens));
    }

    #[test]
    fn only_authority_changes_fees() {
        let mut registry = registry();
        assert_eq!(
            registry.set_fee_recipient(MALLORY, Some(MALLORY)).err(),
            Some(AmmError::Unauthorized("caller is not the fee authority"))
        );
        let Err(AmmError::Unauthorized(_)) = registry.set_fee_authority(MALLORY, MALLORY) else {
            panic!("expected Unauthorized");
        };
        assert_eq!(registry.fee_recipient(), None);
        assert_eq!(registry.fee_authority(), AUTHORITY);
        assert!(registry.drain_events().is_empty());

        let Ok(()) = registry.set_fee_recipient(AUTHORITY, Some(FEE_TO)) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.fee_recipient(), Some(FEE_TO));
        let Ok(()) = registry.set_fee_authority(AUTHORITY, MALLORY) else {
            panic!("expected Ok");
        };
        let Err(AmmError::Unauthorized(_)) = registry.set_fee_recipient(AUTHORITY, None) else {
            panic!("expected Unauthorized");
        };
        let Ok(()) = registry.set_fee_recipient(MALLORY, None) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.fee_recipient(), None);
        assert_eq!(registry.drain_events().len(), 3);
    }

    #[test]
    fn null_fee_settings_rejected() {
        let mut registry = registry();
        assert_eq!(
            registry.set_fee_authority(AUTHORITY, Address::zero()),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(
            registry.set_fee_recipient(AUTHORITY, Some(Address::zero())),
            Err(AmmError::ZeroAddress)
        );
        assert_eq!(registry.fee_authority(), AUTHORITY);
    }

    #[cfg(feature = "multi-outcome")]
    #[test]
    fn market_pools_deduplicated_by_outcome_set() {
        let mut registry = registry();
        let Ok(config) = MultiOutcomeConfig::new(X, vec![Z, Y]) else {
            panic!("expected Ok");
        };
        let Ok(pool) = registry.create_market_pool(config.clone()) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.address(), market_pool_address(REGISTRY, X, &[Y, Z]));
        assert_eq!(registry.create_market_pool(config).err(), Some(AmmError::PairExists));
        let Some(found) = registry.get_market_pool(X, &[Z, Y]) else {
            panic!("expected pool");
        };
        assert!(Arc::ptr_eq(&found, &pool));
        assert_eq!(registry.all_market_pools_len(), 1);
        assert!(registry.market_pool_at(0).is_some());
        assert!(registry.get_market_pool(Y, &[X, Z]).is_none());
        assert_eq!(registry.all_pairs_len(), 0);
    }
}
