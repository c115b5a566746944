//! Data models for the Alumia integration
//!
//! Payload models mirror the provider's JSON schema (camelCase on the wire).
//! Filter structs canonicalize into query pairs so that logically identical
//! requests produce identical cache keys.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{EndpointMap, TtlPolicy};
use crate::constants::sync;

/// One of the four logical upstream data categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Destinations,
    Events,
    Bookings,
    Analytics,
}

impl ResourceType {
    /// All resource types, in the order a sync cycle refreshes them
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Destinations,
        ResourceType::Events,
        ResourceType::Bookings,
        ResourceType::Analytics,
    ];

    /// Stable lowercase name used in logs and sync run counts
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Destinations => "destinations",
            ResourceType::Events => "events",
            ResourceType::Bookings => "bookings",
            ResourceType::Analytics => "analytics",
        }
    }

    /// Endpoint path for this resource from the configured mapping
    pub fn endpoint_path<'a>(&self, endpoints: &'a EndpointMap) -> &'a str {
        match self {
            ResourceType::Destinations => &endpoints.destinations,
            ResourceType::Events => &endpoints.events,
            ResourceType::Bookings => &endpoints.bookings,
            ResourceType::Analytics => &endpoints.analytics,
        }
    }

    /// Cache TTL for this resource from the configured policy
    pub fn ttl(&self, policy: &TtlPolicy) -> Duration {
        match self {
            ResourceType::Destinations => policy.destinations,
            ResourceType::Events => policy.events,
            ResourceType::Bookings => policy.bookings,
            ResourceType::Analytics => policy.analytics,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "destinations" => Ok(ResourceType::Destinations),
            "events" => Ok(ResourceType::Events),
            "bookings" => Ok(ResourceType::Bookings),
            "analytics" => Ok(ResourceType::Analytics),
            other => Err(format!("unknown resource type: {other}")),
        }
    }
}

/// Geographic location of a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Contact details for a destination or event organizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Opening hours for a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
    pub days: Vec<String>,
}

/// Visitor capacity for a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub max: u32,
    pub current: u32,
}

/// A tourism destination from the provider catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: GeoLocation,
    pub category: String,
    pub rating: f64,
    pub price: String,
    pub images: Vec<String>,
    pub availability: bool,
    pub accessibility: Vec<String>,
    pub languages: Vec<String>,
    pub contact: ContactInfo,
    pub operating_hours: OperatingHours,
    pub capacity: Capacity,
}

/// A scheduled tourism event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub category: String,
    pub price: f64,
    pub capacity: u32,
    pub registered: u32,
    pub status: String,
    pub organizer: String,
    pub contact: ContactInfo,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

/// A booking held by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub tourist_id: String,
    pub service_type: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub people: u32,
    pub total_price: f64,
    pub status: String,
    pub payment_status: String,
    pub special_requirements: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Visitor count and revenue for a popular destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularDestination {
    pub id: String,
    pub name: String,
    pub visitors: u64,
    pub revenue: f64,
}

/// Attendance and revenue for a popular event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularEvent {
    pub id: String,
    pub name: String,
    pub attendees: u64,
    pub revenue: f64,
}

/// Visitor demographic breakdowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorDemographics {
    pub by_country: HashMap<String, u64>,
    pub by_age: HashMap<String, u64>,
    pub by_language: HashMap<String, u64>,
}

/// Daily booking volume sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingTrend {
    pub date: String,
    pub bookings: u64,
    pub revenue: f64,
}

/// Aggregated analytics for a reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub period: String,
    pub total_visitors: u64,
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub popular_destinations: Vec<PopularDestination>,
    pub popular_events: Vec<PopularEvent>,
    pub visitor_demographics: VisitorDemographics,
    pub booking_trends: Vec<BookingTrend>,
}

/// Wire envelope for destination listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsEnvelope {
    pub destinations: Vec<Destination>,
}

/// Wire envelope for event listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsEnvelope {
    pub events: Vec<TourismEvent>,
}

/// Wire envelope for booking listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsEnvelope {
    pub bookings: Vec<Booking>,
}

/// Filters accepted by the destinations endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationFilters {
    pub category: Option<String>,
    pub city: Option<String>,
    pub availability: Option<bool>,
    pub accessibility: Vec<String>,
}

impl DestinationFilters {
    /// Canonical query pairs (accessibility is joined as CSV, matching the
    /// provider's convention)
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city".to_string(), city.clone()));
        }
        if let Some(availability) = self.availability {
            pairs.push(("availability".to_string(), availability.to_string()));
        }
        if !self.accessibility.is_empty() {
            pairs.push(("accessibility".to_string(), self.accessibility.join(",")));
        }
        pairs
    }
}

/// Filters accepted by the events endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl EventFilters {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(start_date) = &self.start_date {
            pairs.push(("startDate".to_string(), start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            pairs.push(("endDate".to_string(), end_date.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        pairs
    }
}

/// Filters accepted by the bookings endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    pub tourist_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl BookingFilters {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(tourist_id) = &self.tourist_id {
            pairs.push(("touristId".to_string(), tourist_id.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(start_date) = &self.start_date {
            pairs.push(("startDate".to_string(), start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            pairs.push(("endDate".to_string(), end_date.clone()));
        }
        pairs
    }
}

/// Analytics reporting period selector
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsQuery {
    pub period: String,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self {
            period: sync::DEFAULT_ANALYTICS_PERIOD.to_string(),
        }
    }
}

impl AnalyticsQuery {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![("period".to_string(), self.period.clone())]
    }
}
