//! Provider fixtures for the synthetic source
//!
//! `rome_directory` is a fixed demo directory; `generate_providers` scatters
//! random providers around any centre for load and demo setups.

use rand::Rng;
use serde_json::Map;

use crate::models::{Coordinate, Provider};

/// Service categories offered on the marketplace
pub const CATEGORIES: &[&str] = &[
    "Plumbing", "Electrical", "Painting", "Carpentry", "Cleaning",
    "Gardening", "Locksmith", "Appliance Repair", "Moving", "Heating",
];

const NAMES: &[&str] = &[
    "Marco Rossi", "Giulia Bianchi", "Luca Romano", "Francesca Colombo", "Alessandro Ricci",
    "Chiara Marino", "Matteo Greco", "Sara Bruno", "Davide Gallo", "Elena Conti",
    "Andrea De Luca", "Valentina Costa", "Simone Giordano", "Martina Mancini", "Paolo Rizzo",
];

/// Kilometers per degree of latitude on a 6371 km sphere
const KM_PER_DEGREE: f64 = 111.19;

/// Radius around the centre that generated providers are scattered in
const SCATTER_RADIUS_KM: f64 = 15.0;

fn provider(
    id: &str,
    name: &str,
    lat: f64,
    lng: f64,
    radius_km: f64,
    services: &[&str],
    description: &str,
) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@caschigialli.it", id),
        phone: None,
        location: Coordinate::new(lat, lng),
        service_radius_km: Some(radius_km),
        services: services.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
        rating: None,
        review_count: None,
        price_range: None,
        extra: Map::new(),
    }
}

/// Fixed demo directory of providers around Rome
pub fn rome_directory() -> Vec<Provider> {
    vec![
        provider("cg-001", "Marco Rossi", 41.9109, 12.4818, 10.0, &["Plumbing", "Heating"], "Idraulico con 15 anni di esperienza"),
        provider("cg-002", "Giulia Bianchi", 41.8986, 12.4769, 8.0, &["Electrical"], "Impianti elettrici civili"),
        provider("cg-003", "Luca Romano", 41.8902, 12.4922, 5.0, &["Painting", "Carpentry"], "Tinteggiature e piccoli lavori"),
        provider("cg-004", "Francesca Colombo", 41.9270, 12.4660, 15.0, &["Cleaning"], "Pulizie domestiche e uffici"),
        provider("cg-005", "Alessandro Ricci", 41.8719, 12.5361, 20.0, &["Plumbing", "Appliance Repair"], "Riparazioni rapide"),
        provider("cg-006", "Chiara Marino", 41.9633, 12.5080, 12.0, &["Gardening"], "Cura del verde"),
        provider("cg-007", "Matteo Greco", 41.8500, 12.4500, 30.0, &["Moving", "Carpentry"], "Traslochi e montaggio mobili"),
        provider("cg-008", "Sara Bruno", 41.9029, 12.4534, 6.0, &["Locksmith"], "Pronto intervento serrature"),
        provider("cg-009", "Davide Gallo", 41.7950, 12.6000, 25.0, &["Electrical", "Heating"], "Caldaie e climatizzatori"),
        provider("cg-010", "Elena Conti", 42.0500, 12.3000, 10.0, &["Cleaning", "Gardening"], "Servizi per la casa"),
    ]
}

/// Generate `count` random providers within ~15 km of `center`
///
/// Each provider offers one to three categories and a service radius
/// between 5 and 30 km.
pub fn generate_providers<R: Rng + ?Sized>(center: Coordinate, count: usize, rng: &mut R) -> Vec<Provider> {
    (0..count)
        .map(|i| {
            let bearing = rng.random_range(0.0..std::f64::consts::TAU);
            let offset_km = SCATTER_RADIUS_KM * rng.random::<f64>().sqrt();

            let lat = (center.lat + offset_km * bearing.cos() / KM_PER_DEGREE).clamp(-90.0, 90.0);
            let lng_scale = KM_PER_DEGREE * center.lat.to_radians().cos().abs().max(0.01);
            let lng = wrap_longitude(center.lng + offset_km * bearing.sin() / lng_scale);

            let service_count = rng.random_range(1..=3);
            let services: Vec<&str> = rand::seq::index::sample(&mut *rng, CATEGORIES.len(), service_count)
                .into_iter()
                .map(|idx| CATEGORIES[idx])
                .collect();

            let name = NAMES[i % NAMES.len()];
            let radius_km = f64::from(rng.random_range(5u32..=30));

            let mut generated = provider(
                &uuid::Uuid::new_v4().to_string(),
                name,
                lat,
                lng,
                radius_km,
                &services,
                "Profilo generato",
            );
            generated.email = format!("{}@caschigialli.test", name.to_lowercase().replace(' ', "."));
            generated
        })
        .collect()
}

fn wrap_longitude(lng: f64) -> f64 {
    if lng > 180.0 {
        lng - 360.0
    } else if lng < -180.0 {
        lng + 360.0
    } else {
        lng
    }
}
