//! Transient per-day context accumulating modifiers across simulation steps.
//!
//! Created fresh each day before Step 1 and never persisted across days.
//! Every multiplier starts at the identity and every counter at zero.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationContext {
    // Production multipliers
    pub food_production_mult: f32,
    pub water_production_mult: f32,
    pub materials_production_mult: f32,
    pub fuel_production_mult: f32,
    pub repair_output_mult: f32,
    /// Applies to food/water/materials/fuel/repairs alike.
    pub all_production_mult: f32,

    // Consumption multipliers
    pub food_consumption_mult: f32,
    pub water_consumption_mult: f32,
    pub fuel_consumption_mult: f32,

    // Flat consumption additions
    pub flat_food_consumption: i32,

    // Meter deltas accumulated from laws/orders/overcrowding
    pub sickness_delta: i32,
    pub unrest_delta: i32,
    pub morale_delta: i32,

    // Deaths queued for end-of-pipeline application
    pub deaths_sick: i32,
    pub deaths_default: i32,
    pub deaths_healthy_first: i32,

    // Clinic
    pub clinic_medicine_cost_mult: f32,

    // Siege
    pub siege_damage_mult: f32,

    // Meter caps (Martial Law)
    pub unrest_cap: Option<i32>,
    pub morale_cap: Option<i32>,

    // Production results (computed in Step 3, consumed later)
    pub repair_amount: i32,
    pub siege_damage_reduction: i32,
    pub guard_unrest_growth_modifier: f32,
    pub sanitation_units: i32,
    pub clinic_units: i32,

    // Deficit flags (set in Step 4)
    pub food_deficit: bool,
    pub water_deficit: bool,
    pub fuel_deficit: bool,

    // Start-of-day snapshots for reporting
    pub food_start: i32,
    pub water_start: i32,
    pub fuel_start: i32,
    pub medicine_start: i32,
    pub materials_start: i32,
    pub morale_start: i32,
    pub unrest_start: i32,
    pub sickness_start: i32,

    // Produced/consumed totals
    pub food_produced: i32,
    pub water_produced: i32,
    pub materials_produced: i32,
    pub fuel_produced: i32,
    pub food_consumed: i32,
    pub water_consumed: i32,
    pub fuel_consumed: i32,

    pub keep_breached: bool,
}

impl Default for SimulationContext {
    fn default() -> Self {
        SimulationContext {
            food_production_mult: 1.0,
            water_production_mult: 1.0,
            materials_production_mult: 1.0,
            fuel_production_mult: 1.0,
            repair_output_mult: 1.0,
            all_production_mult: 1.0,
            food_consumption_mult: 1.0,
            water_consumption_mult: 1.0,
            fuel_consumption_mult: 1.0,
            flat_food_consumption: 0,
            sickness_delta: 0,
            unrest_delta: 0,
            morale_delta: 0,
            deaths_sick: 0,
            deaths_default: 0,
            deaths_healthy_first: 0,
            clinic_medicine_cost_mult: 1.0,
            siege_damage_mult: 1.0,
            unrest_cap: None,
            morale_cap: None,
            repair_amount: 0,
            siege_damage_reduction: 0,
            guard_unrest_growth_modifier: 1.0,
            sanitation_units: 0,
            clinic_units: 0,
            food_deficit: false,
            water_deficit: false,
            fuel_deficit: false,
            food_start: 0,
            water_start: 0,
            fuel_start: 0,
            medicine_start: 0,
            materials_start: 0,
            morale_start: 0,
            unrest_start: 0,
            sickness_start: 0,
            food_produced: 0,
            water_produced: 0,
            materials_produced: 0,
            fuel_produced: 0,
            food_consumed: 0,
            water_consumed: 0,
            fuel_consumed: 0,
            keep_breached: false,
        }
    }
}

impl SimulationContext {
    pub fn new() -> Self {
        SimulationContext::default()
    }
}
