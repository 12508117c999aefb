//! Shared test fixtures for siege_core and downstream crates.
//!
//! `base_content()` carries the production balance values (zones, constants)
//! with trimmed description text; `base_state()` is the canonical day-1
//! colony with no pressure-profile modifiers applied, so tests start from a
//! neutral, fully deterministic baseline.

use crate::types::{
    ColonyState, Constants, Content, IncidentDef, IncidentId, JobSlot, LawDef, LawId, MetaState,
    MissionDef, MissionId, OrderDef, OrderId, PressureProfileId, ProfileDef, ZoneDef, ZoneState,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

fn zone(
    name: &str,
    order: usize,
    base_integrity: i32,
    integrity_range: (i32, i32),
    capacity: i32,
    perimeter_factor: f32,
) -> ZoneDef {
    ZoneDef {
        name: name.to_string(),
        order,
        base_integrity,
        integrity_range,
        capacity,
        perimeter_factor,
        food_production_modifier: 1.0,
        food_production_lost_modifier: 1.0,
        materials_production_modifier: 1.0,
        materials_production_lost_modifier: 1.0,
        fuel_scavenging_lost_modifier: 1.0,
        unrest_growth_modifier: 1.0,
        morale_bonus: 0,
        on_loss_unrest: 0,
        on_loss_sickness: 0,
        on_loss_morale: 0,
        on_loss_production_note: None,
        is_keep: false,
        has_random_integrity: false,
    }
}

/// The five production zones with the live balance values.
pub fn base_zones() -> Vec<ZoneDef> {
    let mut farms = zone("Outer Farms", 0, 80, (70, 85), 20, 1.0);
    farms.food_production_modifier = 1.5;
    farms.food_production_lost_modifier = 0.6;
    farms.fuel_scavenging_lost_modifier = 0.5;
    farms.on_loss_unrest = 15;
    farms.on_loss_sickness = 10;
    farms.on_loss_morale = -10;
    farms.on_loss_production_note =
        Some("Food production -40%, Fuel scavenging -50%".to_string());
    farms.has_random_integrity = true;

    let mut residential = zone("Outer Residential", 1, 70, (70, 70), 40, 0.9);
    residential.on_loss_unrest = 15;
    residential.on_loss_sickness = 10;
    residential.on_loss_morale = -10;
    residential.on_loss_production_note = Some("Displaced: +overcrowding".to_string());

    let mut artisan = zone("Artisan Quarter", 2, 75, (75, 75), 25, 0.8);
    artisan.materials_production_modifier = 1.4;
    artisan.materials_production_lost_modifier = 0.5;
    artisan.on_loss_unrest = 10;
    artisan.on_loss_morale = -5;
    artisan.on_loss_production_note = Some("Materials production -50%".to_string());

    let mut inner = zone("Inner District", 3, 90, (90, 90), 50, 0.7);
    inner.unrest_growth_modifier = 0.9;
    inner.on_loss_unrest = 25;
    inner.on_loss_morale = -20;
    inner.on_loss_production_note = Some("Unrest growth modifier lost".to_string());

    let mut keep = zone("Keep", 4, 100, (100, 100), 60, 0.6);
    keep.morale_bonus = 10;
    keep.is_keep = true;
    keep.on_loss_production_note = Some("GAME OVER — The Keep has fallen".to_string());

    vec![farms, residential, artisan, inner, keep]
}

pub fn base_constants() -> Constants {
    Constants {
        workers_per_unit: 5,
        base_food_yield: 10,
        base_water_yield: 12,
        base_materials_yield: 8,
        base_fuel_yield: 15,
        base_repair_yield: 8,
        repair_materials_cost: 4,
        clinic_medicine_cost: 5,
        fuel_consumption_baseline: 120,
        siege_escalation_interval_days: 6,
        law_cooldown_days: 3,
        mission_workers: 10,
        victory_day: 40,
    }
}

fn law(id: LawId, name: &str) -> LawDef {
    LawDef {
        id,
        name: name.to_string(),
        description: String::new(),
        requirement: String::new(),
        effects: String::new(),
    }
}

fn order(id: OrderId, name: &str) -> OrderDef {
    OrderDef {
        id,
        name: name.to_string(),
        description: String::new(),
        cost: String::new(),
        effect: String::new(),
    }
}

fn mission(id: MissionId, name: &str) -> MissionDef {
    MissionDef {
        id,
        name: name.to_string(),
        description: String::new(),
        outcomes: String::new(),
        duration_days: 5,
    }
}

/// Full-featured content with live balance values and placeholder text.
pub fn base_content() -> Content {
    Content {
        content_version: "test".to_string(),
        zones: base_zones(),
        laws: vec![
            law(LawId::StrictRations, "Strict Rations"),
            law(LawId::DilutedWater, "Diluted Water"),
            law(LawId::ExtendedShifts, "Extended Shifts"),
            law(LawId::MandatoryGuardService, "Mandatory Guard Service"),
            law(LawId::EmergencyShelters, "Emergency Shelters"),
            law(LawId::PublicExecutions, "Public Executions"),
            law(LawId::FaithProcessions, "Faith Processions"),
            law(LawId::FoodConfiscation, "Food Confiscation"),
            law(LawId::MedicalTriage, "Medical Triage"),
            law(LawId::Curfew, "Curfew"),
            law(LawId::AbandonOuterRing, "Abandon Outer Ring"),
            law(LawId::MartialLaw, "Martial Law"),
        ],
        orders: vec![
            order(OrderId::DivertSupplies, "Divert Supplies to Repairs"),
            order(OrderId::SoupKitchens, "Soup Kitchens"),
            order(OrderId::EmergencyWaterRation, "Emergency Water Ration"),
            order(OrderId::CrackdownPatrols, "Crackdown Patrols"),
            order(OrderId::QuarantineDistrict, "Quarantine District"),
            order(OrderId::InspireThePeople, "Inspire the People"),
        ],
        missions: vec![
            mission(MissionId::ForageBeyondWalls, "Forage Beyond Walls"),
            mission(MissionId::NightRaid, "Night Raid on Siege Camp"),
            mission(MissionId::SearchAbandonedHomes, "Search Abandoned Homes"),
            mission(MissionId::NegotiateBlackMarket, "Negotiate with Black Marketeers"),
        ],
        incidents: vec![
            IncidentDef {
                id: IncidentId::MinorFire,
                name: "Minor Fire".to_string(),
                effect: String::new(),
            },
            IncidentDef {
                id: IncidentId::FeverCluster,
                name: "Fever Cluster".to_string(),
                effect: String::new(),
            },
            IncidentDef {
                id: IncidentId::FoodTheft,
                name: "Food Theft".to_string(),
                effect: String::new(),
            },
            IncidentDef {
                id: IncidentId::GuardDesertion,
                name: "Guard Desertion".to_string(),
                effect: String::new(),
            },
        ],
        profiles: vec![
            ProfileDef {
                id: PressureProfileId::DiseaseWave,
                name: "Disease Wave".to_string(),
                description: String::new(),
            },
            ProfileDef {
                id: PressureProfileId::SupplySpoilage,
                name: "Supply Spoilage".to_string(),
                description: String::new(),
            },
            ProfileDef {
                id: PressureProfileId::SabotagedWells,
                name: "Sabotaged Wells".to_string(),
                description: String::new(),
            },
            ProfileDef {
                id: PressureProfileId::HeavyBombardment,
                name: "Heavy Bombardment".to_string(),
                description: String::new(),
            },
        ],
        constants: base_constants(),
    }
}

/// Day-1 colony at the standard starting numbers, zones filled outer→inner,
/// no pressure-profile modifiers applied.
pub fn base_state(content: &Content) -> ColonyState {
    let zones = content
        .zones
        .iter()
        .map(|def| ZoneState::new(def, def.base_integrity))
        .collect();

    let mut allocation = BTreeMap::new();
    for slot in JobSlot::ALLOCATABLE {
        allocation.insert(slot, 0);
    }

    let mut state = ColonyState {
        meta: MetaState {
            day: 1,
            seed: 42,
            content_version: content.content_version.clone(),
        },
        food: 320,
        water: 360,
        fuel: 240,
        medicine: 40,
        materials: 120,
        morale: 55,
        unrest: 25,
        sickness: 20,
        siege_intensity: 1,
        healthy_workers: 85,
        guards: 10,
        sick: 15,
        elderly: 10,
        zones,
        enacted_laws: Vec::new(),
        days_since_last_law: 3,
        days_since_last_law_enacted: 0,
        today_order: None,
        quarantine_zone: None,
        active_mission: None,
        night_raid_debuff: None,
        scheduled: None,
        wells_damaged: false,
        active_profile: PressureProfileId::SupplySpoilage,
        profile_food_consumption_mult: 1.0,
        scheduled_incidents: Vec::new(),
        consecutive_food_water_zero_days: 0,
        consecutive_food_deficit_days: 0,
        worker_allocation: allocation,
        is_game_over: false,
        game_over_reason: None,
        is_victory: false,
    };
    crate::population::initialize_zone_populations(&mut state);
    state
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
