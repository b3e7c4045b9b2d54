//! Submit a handful of airport-bound requests and run one match attempt.
//!
//! Run with: cargo run -p pool_core --example pooling_run

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use pool_core::domain::{NewRequest, PassengerId};
use pool_core::engine::{EngineConfig, MatchingEngine};
use pool_core::spatial::GeoPoint;
use pool_core::store::{InMemoryGroupStore, InMemoryRequestStore};

fn main() {
    // Pickups around central Berlin, all headed to BER airport.
    let airport = GeoPoint::new(52.3667, 13.5033);
    let pickups = [
        ("anna", 52.5200, 13.4050),
        ("ben", 52.5150, 13.3900),
        ("carla", 52.5300, 13.4120),
        ("dmitri", 52.5020, 13.4200),
    ];

    let engine = MatchingEngine::new(
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryGroupStore::new()),
        EngineConfig {
            destination: airport,
            ..EngineConfig::default()
        },
    );

    let departure = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let mut ids = Vec::new();
    for (name, lat, lng) in pickups {
        let request = engine
            .submit_request(NewRequest {
                passenger: PassengerId::new(name),
                pickup: GeoPoint::new(lat, lng),
                departure,
                seats: 1,
                luggage: 1,
                max_detour_pct: 80,
            })
            .expect("submit");
        println!("submitted {name}: {}", request.id);
        ids.push(request.id);
    }

    match engine.find_group(ids[0]).expect("match attempt") {
        Some(group) => {
            println!("\n--- Group {} ---", group.id);
            println!(
                "members: {}  seats used: {}/{}  luggage: {}",
                group.member_requests.len(),
                group.total_passengers,
                group.total_seats,
                group.total_luggage
            );
            println!(
                "route: {:.2} km, ~{:.0} min over {} waypoints",
                group.route.total_distance_km,
                group.route.estimated_duration_min,
                group.route.waypoints.len()
            );
            for member in &group.member_requests {
                println!("  {member}  detour {:.1}%", group.route.detour_for(*member));
            }
            let fare = engine.quote(group.id, 1.0).expect("quote");
            println!("fare: {:.2} {}", fare.total, fare.currency);
        }
        None => println!("\nno compatible group yet; requests stay pending"),
    }
}
