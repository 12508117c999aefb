//! Type definitions for `siege_core`.
//!
//! Mutable run state (`ColonyState`, `ZoneState`) and the immutable content
//! tables (`Content`, `*Def`) the simulation is parameterized by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Zone indices
// ---------------------------------------------------------------------------

/// Fixed zone layout: index 0 is the outermost ring, 4 the Keep.
pub const ZONE_COUNT: usize = 5;
pub const FARMS: usize = 0;
pub const RESIDENTIAL: usize = 1;
pub const ARTISAN: usize = 2;
pub const INNER: usize = 3;
pub const KEEP: usize = 4;

// ---------------------------------------------------------------------------
// Identifier enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobSlot {
    FoodProduction,
    WaterDrawing,
    MaterialsCrafting,
    Repairs,
    Sanitation,
    ClinicStaff,
    FuelScavenging,
    /// Guards serve automatically; the slot is never player-allocatable.
    GuardDuty,
}

impl JobSlot {
    /// The seven slots the player can assign workers to.
    pub const ALLOCATABLE: [JobSlot; 7] = [
        JobSlot::FoodProduction,
        JobSlot::WaterDrawing,
        JobSlot::MaterialsCrafting,
        JobSlot::Repairs,
        JobSlot::Sanitation,
        JobSlot::ClinicStaff,
        JobSlot::FuelScavenging,
    ];

    /// Slots to strip workers from when the pool shrinks, least critical first.
    pub const SHED_ORDER: [JobSlot; 7] = [
        JobSlot::FuelScavenging,
        JobSlot::ClinicStaff,
        JobSlot::Sanitation,
        JobSlot::Repairs,
        JobSlot::MaterialsCrafting,
        JobSlot::WaterDrawing,
        JobSlot::FoodProduction,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LawId {
    StrictRations,
    DilutedWater,
    ExtendedShifts,
    MandatoryGuardService,
    EmergencyShelters,
    PublicExecutions,
    FaithProcessions,
    FoodConfiscation,
    MedicalTriage,
    Curfew,
    AbandonOuterRing,
    MartialLaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderId {
    DivertSupplies,
    SoupKitchens,
    EmergencyWaterRation,
    CrackdownPatrols,
    QuarantineDistrict,
    InspireThePeople,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionId {
    ForageBeyondWalls,
    NightRaid,
    SearchAbandonedHomes,
    NegotiateBlackMarket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentId {
    MinorFire,
    FeverCluster,
    FoodTheft,
    GuardDesertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureProfileId {
    DiseaseWave,
    SupplySpoilage,
    SabotagedWells,
    HeavyBombardment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Breach,
    CouncilRevolt,
    TotalCollapse,
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GameOverReason::Breach => "Breach",
            GameOverReason::CouncilRevolt => "Council Revolt",
            GameOverReason::TotalCollapse => "Total Collapse",
        })
    }
}

// ---------------------------------------------------------------------------
// Runtime sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveMission {
    pub mission: MissionId,
    pub start_day: u32,
    pub workers_committed: i32,
    /// Captured at launch: Night Raid left with fuel below its 40-unit need.
    pub fuel_was_insufficient: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightRaidDebuff {
    pub intensity_reduction: i32,
    pub days_remaining: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledIncident {
    pub incident: IncidentId,
    pub day: u32,
    pub resolved: bool,
}

/// One pending player action, executed by the driver at the day boundary.
/// Choosing one clears any other (see `actions::schedule_*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    Law(LawId),
    Order(OrderId, Option<usize>),
    Mission(MissionId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaState {
    pub day: u32,
    pub seed: u64,
    pub content_version: String,
}

// ---------------------------------------------------------------------------
// Zone state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneState {
    pub current_integrity: i32,
    pub current_population: i32,
    /// Monotonic: once a ring falls it never recovers.
    pub is_lost: bool,
    /// Normally the definition capacity; Emergency Shelters raises it.
    pub effective_capacity: i32,
}

impl ZoneState {
    pub fn new(def: &ZoneDef, integrity: i32) -> Self {
        ZoneState {
            current_integrity: integrity,
            current_population: 0,
            is_lost: false,
            effective_capacity: def.capacity,
        }
    }

    pub fn overcrowding_percent(&self) -> f32 {
        if self.effective_capacity <= 0 || self.current_population <= self.effective_capacity {
            return 0.0;
        }
        (self.current_population - self.effective_capacity) as f32
            / self.effective_capacity as f32
            * 100.0
    }

    /// Whole 10%-tiers of overcrowding; drives food surcharges and penalties.
    pub fn overcrowding_tiers(&self) -> i32 {
        (self.overcrowding_percent() / 10.0).floor() as i32
    }

    pub fn is_overcrowded(&self) -> bool {
        self.current_population > self.effective_capacity
    }

    pub fn is_overcrowded_20pct(&self) -> bool {
        self.current_population as f32 > self.effective_capacity as f32 * 1.2
    }
}

// ---------------------------------------------------------------------------
// Colony state
// ---------------------------------------------------------------------------

/// Holds ALL mutable state for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonyState {
    pub meta: MetaState,

    // Resources
    pub food: i32,
    pub water: i32,
    pub fuel: i32,
    pub medicine: i32,
    pub materials: i32,

    // Meters
    pub morale: i32,
    pub unrest: i32,
    pub sickness: i32,
    pub siege_intensity: i32,

    // Population
    pub healthy_workers: i32,
    pub guards: i32,
    pub sick: i32,
    pub elderly: i32,

    /// Exactly five rings, index 0 = Outer Farms … 4 = Keep.
    pub zones: Vec<ZoneState>,

    // Laws
    pub enacted_laws: Vec<LawId>,
    pub days_since_last_law: i32,
    /// Feeds the "no law enacted recently" unrest condition.
    pub days_since_last_law_enacted: i32,

    // Emergency orders
    pub today_order: Option<OrderId>,
    pub quarantine_zone: Option<usize>,

    // Missions
    pub active_mission: Option<ActiveMission>,
    pub night_raid_debuff: Option<NightRaidDebuff>,

    // Pending player action for the day boundary
    pub scheduled: Option<ScheduledAction>,

    // Wells
    pub wells_damaged: bool,

    // Pressure profile
    pub active_profile: PressureProfileId,
    pub profile_food_consumption_mult: f32,

    // Scheduled early incidents
    pub scheduled_incidents: Vec<ScheduledIncident>,

    // Tracking
    pub consecutive_food_water_zero_days: i32,
    pub consecutive_food_deficit_days: i32,

    pub worker_allocation: BTreeMap<JobSlot, i32>,

    // End state
    pub is_game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub is_victory: bool,
}

impl ColonyState {
    pub fn total_population(&self) -> i32 {
        self.healthy_workers + self.guards + self.sick + self.elderly
    }

    /// Healthy workers minus those committed to an active mission.
    pub fn available_workers(&self) -> i32 {
        let committed = self
            .active_mission
            .as_ref()
            .map_or(0, |m| m.workers_committed);
        self.healthy_workers - committed
    }

    pub fn assigned_workers(&self) -> i32 {
        self.worker_allocation
            .iter()
            .filter(|(slot, _)| **slot != JobSlot::GuardDuty)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn idle_workers(&self) -> i32 {
        (self.available_workers() - self.assigned_workers()).max(0)
    }

    pub fn idle_percent(&self) -> f32 {
        let total = self.total_population();
        if total > 0 {
            self.idle_workers() as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn allocation(&self, slot: JobSlot) -> i32 {
        self.worker_allocation.get(&slot).copied().unwrap_or(0)
    }

    /// Index of the outermost non-lost zone (the active perimeter).
    /// Falls back to the Keep, which cannot be lost short of a breach.
    pub fn active_perimeter(&self) -> usize {
        self.zones.iter().position(|z| !z.is_lost).unwrap_or(KEEP)
    }

    pub fn any_zone_lost(&self) -> bool {
        self.zones.iter().any(|z| z.is_lost)
    }

    pub fn any_zone_overcrowded(&self) -> bool {
        self.zones
            .iter()
            .any(|z| !z.is_lost && z.is_overcrowded())
    }

    /// Number of non-lost zones at ≥20% over capacity (fuel surcharge input).
    pub fn zones_over_20pct_count(&self) -> i32 {
        self.zones
            .iter()
            .filter(|z| !z.is_lost && z.is_overcrowded_20pct())
            .count() as i32
    }

    /// Clamps morale, unrest, and sickness to [0, 100].
    pub fn clamp_meters(&mut self) {
        self.morale = self.morale.clamp(0, 100);
        self.unrest = self.unrest.clamp(0, 100);
        self.sickness = self.sickness.clamp(0, 100);
    }
}

// ---------------------------------------------------------------------------
// Content definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDef {
    pub name: String,
    pub order: usize,
    pub base_integrity: i32,
    /// Inclusive draw range used when `has_random_integrity` is set.
    pub integrity_range: (i32, i32),
    pub capacity: i32,
    /// Scales incoming siege damage while this ring is the perimeter.
    pub perimeter_factor: f32,
    pub food_production_modifier: f32,
    pub food_production_lost_modifier: f32,
    pub materials_production_modifier: f32,
    pub materials_production_lost_modifier: f32,
    pub fuel_scavenging_lost_modifier: f32,
    /// Applied to positive unrest growth while this ring stands (Inner: 0.9).
    pub unrest_growth_modifier: f32,
    /// Daily morale while this ring stands (Keep: +10).
    pub morale_bonus: i32,
    pub on_loss_unrest: i32,
    pub on_loss_sickness: i32,
    pub on_loss_morale: i32,
    pub on_loss_production_note: Option<String>,
    pub is_keep: bool,
    pub has_random_integrity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawDef {
    pub id: LawId,
    pub name: String,
    pub description: String,
    pub requirement: String,
    pub effects: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDef {
    pub id: OrderId,
    pub name: String,
    pub description: String,
    pub cost: String,
    pub effect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionDef {
    pub id: MissionId,
    pub name: String,
    pub description: String,
    pub outcomes: String,
    pub duration_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentDef {
    pub id: IncidentId,
    pub name: String,
    pub effect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDef {
    pub id: PressureProfileId,
    pub name: String,
    pub description: String,
}

/// Balance constants shared by the step pipeline and the projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    /// Workers per production unit across every job slot.
    pub workers_per_unit: i32,
    pub base_food_yield: i32,
    pub base_water_yield: i32,
    pub base_materials_yield: i32,
    pub base_fuel_yield: i32,
    pub base_repair_yield: i32,
    pub repair_materials_cost: i32,
    pub clinic_medicine_cost: i32,
    /// Fuel baseline: this many units per this many people per day.
    pub fuel_consumption_baseline: i32,
    pub siege_escalation_interval_days: u32,
    pub law_cooldown_days: i32,
    pub mission_workers: i32,
    pub victory_day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub content_version: String,
    pub zones: Vec<ZoneDef>,
    pub laws: Vec<LawDef>,
    pub orders: Vec<OrderDef>,
    pub missions: Vec<MissionDef>,
    pub incidents: Vec<IncidentDef>,
    pub profiles: Vec<ProfileDef>,
    pub constants: Constants,
}

impl Content {
    pub fn law(&self, id: LawId) -> Option<&LawDef> {
        self.laws.iter().find(|l| l.id == id)
    }

    pub fn order(&self, id: OrderId) -> Option<&OrderDef> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn mission(&self, id: MissionId) -> Option<&MissionDef> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn incident(&self, id: IncidentId) -> Option<&IncidentDef> {
        self.incidents.iter().find(|i| i.id == id)
    }

    /// Mission duration in days, defaulting when the table lacks the entry.
    pub fn mission_duration(&self, id: MissionId) -> u32 {
        self.mission(id).map_or(5, |m| m.duration_days.max(1))
    }
}
