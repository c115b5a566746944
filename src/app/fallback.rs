//! Static fallback payloads for degraded operation
//!
//! When a live fetch cannot be satisfied (integration disabled, upstream
//! error, timeout) the facade substitutes these deterministic, schema-valid
//! payloads so callers never observe a failure. Pure data; no I/O, never
//! fails, structurally identical on every call.

use std::collections::HashMap;

use crate::app::models::{
    AnalyticsReport, Booking, BookingTrend, Capacity, ContactInfo, Destination, GeoLocation,
    OperatingHours, PopularDestination, PopularEvent, TourismEvent, VisitorDemographics,
};
use crate::constants::sync;

/// Supplies substitute payloads per resource type
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

impl FallbackProvider {
    /// Fallback destination catalog
    pub fn destinations() -> Vec<Destination> {
        vec![Destination {
            id: "fallback-dest-1".to_string(),
            name: "Gruta do Lago Azul".to_string(),
            description: "One of the most striking caves in the world, with crystal-clear water"
                .to_string(),
            location: GeoLocation {
                latitude: -21.1261,
                longitude: -56.4847,
                address: "Rodovia MS-178, Km 0".to_string(),
                city: "Bonito".to_string(),
                state: "MS".to_string(),
            },
            category: "ecoturismo".to_string(),
            rating: 4.9,
            price: "R$ 120".to_string(),
            images: vec!["https://alumia.com/images/gruta-lago-azul-1.jpg".to_string()],
            availability: true,
            accessibility: vec!["wheelchair_partial".to_string()],
            languages: vec![
                "pt-BR".to_string(),
                "en-US".to_string(),
                "es-ES".to_string(),
            ],
            contact: ContactInfo {
                phone: "(67) 3255-1414".to_string(),
                email: "contato@grutalagoazul.com".to_string(),
                website: Some("https://grutalagoazul.com".to_string()),
            },
            operating_hours: OperatingHours {
                open: "08:00".to_string(),
                close: "17:00".to_string(),
                days: vec![
                    "segunda".to_string(),
                    "terça".to_string(),
                    "quarta".to_string(),
                    "quinta".to_string(),
                    "sexta".to_string(),
                    "sábado".to_string(),
                    "domingo".to_string(),
                ],
            },
            capacity: Capacity {
                max: 200,
                current: 45,
            },
        }]
    }

    /// Fallback event listing
    pub fn events() -> Vec<TourismEvent> {
        vec![TourismEvent {
            id: "fallback-event-1".to_string(),
            name: "Festival de Inverno Bonito".to_string(),
            description: "Cultural festival with music, gastronomy and art".to_string(),
            start_date: "2024-07-15".to_string(),
            end_date: "2024-07-20".to_string(),
            location: "Praça da Liberdade, Bonito".to_string(),
            category: "cultura".to_string(),
            price: 50.0,
            capacity: 1000,
            registered: 750,
            status: "upcoming".to_string(),
            organizer: "Prefeitura de Bonito".to_string(),
            contact: ContactInfo {
                phone: "(67) 3255-1414".to_string(),
                email: "festival@bonito.ms.gov.br".to_string(),
                website: None,
            },
            images: vec!["https://alumia.com/images/festival-inverno-1.jpg".to_string()],
            tags: vec![
                "música".to_string(),
                "gastronomia".to_string(),
                "arte".to_string(),
                "cultura".to_string(),
            ],
        }]
    }

    /// Fallback booking listing
    pub fn bookings() -> Vec<Booking> {
        vec![Booking {
            id: "fallback-booking-1".to_string(),
            tourist_id: "tourist-123".to_string(),
            service_type: "destination".to_string(),
            service_id: "fallback-dest-1".to_string(),
            date: "2024-07-20".to_string(),
            time: "14:00".to_string(),
            people: 2,
            total_price: 240.0,
            status: "confirmed".to_string(),
            payment_status: "paid".to_string(),
            special_requirements: vec!["wheelchair_access".to_string()],
            created_at: "2024-07-10T10:00:00Z".to_string(),
            updated_at: "2024-07-10T10:30:00Z".to_string(),
        }]
    }

    /// Fallback analytics report for the default period
    pub fn analytics() -> AnalyticsReport {
        AnalyticsReport {
            period: sync::DEFAULT_ANALYTICS_PERIOD.to_string(),
            total_visitors: 15_000,
            total_bookings: 2_500,
            total_revenue: 450_000.0,
            popular_destinations: vec![PopularDestination {
                id: "fallback-dest-1".to_string(),
                name: "Gruta do Lago Azul".to_string(),
                visitors: 3_500,
                revenue: 420_000.0,
            }],
            popular_events: vec![PopularEvent {
                id: "fallback-event-1".to_string(),
                name: "Festival de Inverno".to_string(),
                attendees: 750,
                revenue: 37_500.0,
            }],
            visitor_demographics: VisitorDemographics {
                by_country: demographic_map(&[
                    ("Brasil", 12_000),
                    ("Argentina", 1_500),
                    ("Estados Unidos", 800),
                    ("Alemanha", 400),
                    ("Outros", 300),
                ]),
                by_age: demographic_map(&[
                    ("18-25", 3_000),
                    ("26-35", 4_500),
                    ("36-45", 4_000),
                    ("46-55", 2_500),
                    ("55+", 1_000),
                ]),
                by_language: demographic_map(&[
                    ("pt-BR", 12_000),
                    ("es-ES", 1_500),
                    ("en-US", 800),
                    ("de-DE", 400),
                    ("outros", 300),
                ]),
            },
            booking_trends: vec![
                BookingTrend {
                    date: "2024-07-01".to_string(),
                    bookings: 85,
                    revenue: 15_300.0,
                },
                BookingTrend {
                    date: "2024-07-02".to_string(),
                    bookings: 92,
                    revenue: 16_560.0,
                },
            ],
        }
    }
}

fn demographic_map(entries: &[(&str, u64)]) -> HashMap<String, u64> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}
