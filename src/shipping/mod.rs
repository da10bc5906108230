//! Shipping zone resolution.
//!
//! [`ZoneResolver`] picks the single most specific shipping zone for a
//! postcode and country:
//!
//! - postcode rules (exact, `low...high` range, `prefix*` wildcard) rank 3
//! - country rules rank 1
//! - state and continent rules are loaded but never match, since no state or
//!   continent is part of the input
//!
//! A higher rank always wins. Between equal ranks the first location seen in
//! zone order wins; an equal-rank match in a different zone means the store's
//! zones overlap and is logged. When nothing matches, the catch-all zone
//! (id 0) is returned if the store has one.
//!
//! # Example
//!
//! ```rust
//! use storefront_api::rest::resources::{LocationKind, ShippingZone, ShippingZoneLocation};
//! use storefront_api::shipping::{ZoneDefinition, ZoneResolver};
//!
//! let resolver = ZoneResolver::new(vec![
//!     ZoneDefinition::new(
//!         ShippingZone { id: Some(1), name: "Sweden".into(), order: 0 },
//!         vec![ShippingZoneLocation::new(LocationKind::Country, "SE")],
//!     ),
//!     ZoneDefinition::new(
//!         ShippingZone { id: Some(2), name: "Stockholm".into(), order: 1 },
//!         vec![ShippingZoneLocation::new(LocationKind::Postcode, "111*")],
//!     ),
//! ]);
//!
//! let matched = resolver.resolve("111 22", "se").unwrap();
//! assert_eq!(matched.zone_id, 2);
//! assert_eq!(matched.priority(), 3);
//! ```

mod location;

pub use location::{normalize_country, normalize_postcode};

use serde::Deserialize;

use crate::clients::RestClient;
use crate::rest::resources::{
    v3::locations_from_value, LocationKind, ShippingZone, ShippingZoneLocation, FALLBACK_ZONE_ID,
};
use crate::rest::{ResourceError, ResourceOperation, RestResource};
use location::LocationRule;
use std::collections::HashMap;

/// A zone together with its location rules, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDefinition {
    /// The zone.
    pub zone: ShippingZone,
    /// Its locations, in the order the store lists them.
    pub locations: Vec<ShippingZoneLocation>,
}

impl ZoneDefinition {
    /// Pairs a zone with its locations.
    #[must_use]
    pub const fn new(zone: ShippingZone, locations: Vec<ShippingZoneLocation>) -> Self {
        Self { zone, locations }
    }
}

/// How a zone was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// A location rule of this kind matched.
    Location {
        /// Kind of the winning rule.
        kind: LocationKind,
        /// Its rank.
        priority: u8,
    },
    /// Nothing matched; the catch-all zone was used.
    Fallback,
}

/// The resolved zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMatch {
    /// Zone id.
    pub zone_id: u64,
    /// Zone name.
    pub zone_name: String,
    /// How the zone was chosen.
    pub source: MatchSource,
}

impl ZoneMatch {
    /// Returns `true` when the catch-all zone was used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, MatchSource::Fallback)
    }

    /// Rank of the winning rule; 0 for the fallback.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self.source {
            MatchSource::Location { priority, .. } => priority,
            MatchSource::Fallback => 0,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledZone {
    id: u64,
    name: String,
    rules: Vec<(LocationKind, LocationRule)>,
}

/// Resolves postcodes and countries to shipping zones.
///
/// Built once from the store's zones; resolving is pure and does no I/O.
#[derive(Debug, Clone, Default)]
pub struct ZoneResolver {
    zones: Vec<CompiledZone>,
    fallback: Option<(u64, String)>,
}

// Verify ZoneResolver is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ZoneResolver>();
};

impl ZoneResolver {
    /// Builds a resolver from zones in store order.
    ///
    /// Zones without an id are skipped. The zone with id 0 becomes the
    /// fallback and its locations are ignored.
    #[must_use]
    pub fn new(definitions: Vec<ZoneDefinition>) -> Self {
        let mut zones = Vec::with_capacity(definitions.len());
        let mut fallback = None;

        for ZoneDefinition { zone, locations } in definitions {
            let Some(id) = zone.id else {
                tracing::debug!(name = %zone.name, "Skipping shipping zone without id");
                continue;
            };

            if id == FALLBACK_ZONE_ID {
                fallback = Some((id, zone.name));
                continue;
            }

            let rules = locations
                .iter()
                .map(|location| (location.kind, LocationRule::compile(location)))
                .collect();
            zones.push(CompiledZone {
                id,
                name: zone.name,
                rules,
            });
        }

        Self { zones, fallback }
    }

    /// Number of zones, not counting the fallback.
    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if the store has a catch-all zone.
    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Finds the best zone for `postcode` and `country`.
    ///
    /// Either input may be empty. Returns `None` only when no rule matches
    /// and there is no fallback zone.
    #[must_use]
    pub fn resolve(&self, postcode: &str, country: &str) -> Option<ZoneMatch> {
        let postcode = normalize_postcode(postcode);
        let country = normalize_country(country);

        let mut best: Option<(&CompiledZone, LocationKind, u8)> = None;

        for zone in &self.zones {
            for (kind, rule) in &zone.rules {
                if !rule.matches(&postcode, &country) {
                    continue;
                }
                let priority = kind.priority();

                match best {
                    Some((current, _, best_priority)) if priority <= best_priority => {
                        if priority == best_priority && current.id != zone.id {
                            tracing::warn!(
                                kept_zone = current.id,
                                ignored_zone = zone.id,
                                kind = %kind,
                                priority,
                                postcode = %postcode,
                                country = %country,
                                "Overlapping shipping zones, keeping the first"
                            );
                        }
                    }
                    _ => best = Some((zone, *kind, priority)),
                }
            }
        }

        if let Some((zone, kind, priority)) = best {
            return Some(ZoneMatch {
                zone_id: zone.id,
                zone_name: zone.name.clone(),
                source: MatchSource::Location { kind, priority },
            });
        }

        self.fallback.as_ref().map(|(id, name)| ZoneMatch {
            zone_id: *id,
            zone_name: name.clone(),
            source: MatchSource::Fallback,
        })
    }
}

/// Fetches every zone and its locations and builds a resolver.
///
/// Zones are fetched in one call; locations are then fetched zone by zone,
/// skipping the fallback zone, which has none.
///
/// # Errors
///
/// Returns [`ResourceError`] if any call fails or a body does not parse.
pub async fn load_zones(client: &RestClient) -> Result<ZoneResolver, ResourceError> {
    let path = ShippingZone::resolve_path(ResourceOperation::All, &HashMap::new())?;
    let response = client.get(&path, None).await?;
    let zones =
        Vec::<ShippingZone>::deserialize(&response.body).map_err(|source| {
            ResourceError::Deserialize {
                resource: ShippingZone::NAME,
                source,
            }
        })?;

    let mut definitions = Vec::with_capacity(zones.len());
    for zone in zones {
        let locations = match zone.id {
            Some(id) if id != FALLBACK_ZONE_ID => fetch_locations(client, id).await?,
            _ => Vec::new(),
        };
        definitions.push(ZoneDefinition::new(zone, locations));
    }

    tracing::debug!(zones = definitions.len(), "Loaded shipping zones");
    Ok(ZoneResolver::new(definitions))
}

async fn fetch_locations(
    client: &RestClient,
    zone_id: u64,
) -> Result<Vec<ShippingZoneLocation>, ResourceError> {
    let mut ids: HashMap<&str, String> = HashMap::new();
    ids.insert("zone_id", zone_id.to_string());
    let path = ShippingZoneLocation::resolve_path(ResourceOperation::All, &ids)?;

    let response = client.get(&path, None).await?;
    locations_from_value(zone_id, &response.body).map_err(|source| ResourceError::Deserialize {
        resource: ShippingZoneLocation::NAME,
        source,
    })
}
