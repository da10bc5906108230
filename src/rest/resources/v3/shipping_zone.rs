//! Shipping zone and zone location resources.
//!
//! A zone groups location rules (postcodes, states, countries, continents).
//! Zone id 0 is the store's built-in "rest of the world" zone; it has no
//! locations and is only used when nothing else matches (see
//! [`ZoneResolver`](crate::shipping::ZoneResolver)).
//!
//! Locations have no id of their own. The upstream only lists them per zone
//! and replaces the whole list in one PUT.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::clients::RestClient;
use crate::rest::{ResourceError, ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

/// Id of the catch-all zone.
pub const FALLBACK_ZONE_ID: u64 = 0;

/// A shipping zone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShippingZone {
    /// The unique identifier. Sent only in batch updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Zone name.
    #[serde(default)]
    pub name: String,
    /// Sort order; lower values are listed first.
    #[serde(default)]
    pub order: i64,
}

impl ShippingZone {
    /// Returns `true` for the catch-all zone.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.id == Some(FALLBACK_ZONE_ID)
    }
}

impl RestResource for ShippingZone {
    type Id = u64;
    type FindParams = ();

    const NAME: &'static str = "ShippingZone";
    const PLURAL: &'static str = "zones";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "shipping/zones/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "shipping/zones"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "shipping/zones",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "shipping/zones/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "shipping/zones/{id}",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Kind of a zone location rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Exact postcode, numeric range (`1000...1999`) or wildcard (`111*`).
    Postcode,
    /// State code, e.g. `US:CA`.
    State,
    /// ISO country code.
    Country,
    /// Continent code.
    Continent,
}

impl LocationKind {
    /// Match specificity; a higher value beats a lower one.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Postcode => 3,
            Self::State => 2,
            Self::Country => 1,
            Self::Continent => 0,
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postcode => "postcode",
            Self::State => "state",
            Self::Country => "country",
            Self::Continent => "continent",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location rule belonging to a shipping zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingZoneLocation {
    /// The rule value (postcode pattern, country code, ...).
    pub code: String,
    /// The rule kind.
    #[serde(rename = "type")]
    pub kind: LocationKind,
    /// The owning zone. Not part of the upstream body.
    #[serde(skip)]
    pub zone_id: Option<u64>,
}

impl ShippingZoneLocation {
    /// Creates a location rule.
    #[must_use]
    pub fn new(kind: LocationKind, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind,
            zone_id: None,
        }
    }

    /// Replaces every location of `zone_id` with `locations`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the body cannot be serialized, the
    /// request fails, or the returned list does not parse.
    pub async fn replace_all(
        client: &RestClient,
        zone_id: u64,
        locations: &[Self],
    ) -> Result<Vec<Self>, ResourceError> {
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert("zone_id", zone_id.to_string());
        let path = Self::resolve_path(ResourceOperation::Update, &ids)?;

        let body = serde_json::to_value(locations).map_err(|source| ResourceError::Serialize {
            resource: Self::NAME,
            source,
        })?;
        let response = client.put(&path, body, None).await?;

        let mut stored: Vec<Self> =
            Vec::deserialize(&response.body).map_err(|source| ResourceError::Deserialize {
                resource: Self::NAME,
                source,
            })?;
        for location in &mut stored {
            location.zone_id = Some(zone_id);
        }
        Ok(stored)
    }
}

impl RestResource for ShippingZoneLocation {
    type Id = u64;
    type FindParams = ();

    const NAME: &'static str = "ShippingZoneLocation";
    const PLURAL: &'static str = "locations";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::All,
            &["zone_id"],
            "shipping/zones/{zone_id}/locations",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["zone_id"],
            "shipping/zones/{zone_id}/locations",
        ),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        None
    }

    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        self.zone_id
            .map(|id| vec![("zone_id", id.to_string())])
            .unwrap_or_default()
    }

    fn set_parent_id(&mut self, name: &str, value: &str) {
        if name == "zone_id" {
            self.zone_id = value.parse().ok();
        }
    }
}

/// Parses a location list body, tagging every entry with `zone_id`.
pub(crate) fn locations_from_value(
    zone_id: u64,
    body: &Value,
) -> Result<Vec<ShippingZoneLocation>, serde_json::Error> {
    let mut locations = Vec::<ShippingZoneLocation>::deserialize(body)?;
    for location in &mut locations {
        location.zone_id = Some(zone_id);
    }
    Ok(locations)
}
