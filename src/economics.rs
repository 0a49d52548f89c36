//! Lifecycle economics: net present costs, NPC and LCOE.

use std::fmt;
use std::ops::Add;

use crate::components::{Microgrid, Project};
use crate::sim::stats::OperationStats;

/// Cost factors of one component (or a sum of components), as net
/// present values over the project lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostFactors {
    /// Total cost (investment + replacement + O&M + fuel + salvage).
    pub total: f64,
    /// Initial investment cost.
    pub investment: f64,
    /// Replacement cost.
    pub replacement: f64,
    /// Operation & maintenance cost.
    pub om: f64,
    /// Fuel cost.
    pub fuel: f64,
    /// Salvage credit (negative).
    pub salvage: f64,
}

impl CostFactors {
    /// Cost factors of a single component given its quantity and unit
    /// prices.
    ///
    /// The component is bought in `quantity` units (kW or kWh), which
    /// multiplies the unit prices for investment, replacement, salvage
    /// and O&M. Its `lifetime_y` sets the replacement schedule over the
    /// project lifetime; the salvage credit is proportional to the
    /// remaining life at the project end. O&M and fuel recur yearly and
    /// are discounted. A component with an infinite lifetime is never
    /// replaced and salvages at full price.
    ///
    /// # Arguments
    ///
    /// * `project` - Project framing (lifetime, discount rate)
    /// * `quantity` - Installed quantity (kW or kWh)
    /// * `lifetime_y` - Component lifetime (y), may be infinite
    /// * `investment_price` - $/unit
    /// * `replacement_price` - $/unit
    /// * `salvage_price` - $/unit
    /// * `om_price_per_y` - $/unit/y
    /// * `fuel_consumption_per_y` - fu/y (0 for fuel-free components)
    /// * `fuel_price` - $/fu
    #[expect(clippy::too_many_arguments)]
    pub fn from_prices(
        project: &Project,
        quantity: f64,
        lifetime_y: f64,
        investment_price: f64,
        replacement_price: f64,
        salvage_price: f64,
        om_price_per_y: f64,
        fuel_consumption_per_y: f64,
        fuel_price: f64,
    ) -> Self {
        let years = project.lifetime_y as usize;
        let rate = project.discount_rate;

        // discount factor for each year of the project
        let discount_factors: Vec<f64> =
            (1..=years).map(|i| 1.0 / (1.0 + rate).powi(i as i32)).collect();
        let sum_discounts: f64 = discount_factors.iter().sum();

        let (replacements, salvage_ratio) = if lifetime_y.is_finite() && lifetime_y > 0.0 {
            let n = ((years as f64 / lifetime_y).ceil() as usize).max(1) - 1;
            let remaining_life = lifetime_y * (1 + n) as f64 - years as f64;
            (n, remaining_life / lifetime_y)
        } else {
            // never replaced within the project, full value remains
            (0, 1.0)
        };

        let investment = investment_price * quantity;
        let om = om_price_per_y * quantity * sum_discounts;
        let replacement = if replacements == 0 {
            0.0
        } else {
            let replacement_discounts: f64 = (1..=replacements)
                .map(|i| 1.0 / (1.0 + rate).powf(i as f64 * lifetime_y))
                .sum();
            replacement_price * quantity * replacement_discounts
        };
        // zero-length projects are rejected by validation, but keep the
        // direct call total over any input
        let end_discount = discount_factors.last().copied().unwrap_or(0.0);
        let salvage = -salvage_price * salvage_ratio * quantity * end_discount;
        let fuel = fuel_price * fuel_consumption_per_y * sum_discounts;

        let total = investment + replacement + om + fuel + salvage;
        Self {
            total,
            investment,
            replacement,
            om,
            fuel,
            salvage,
        }
    }
}

impl Add for CostFactors {
    type Output = CostFactors;

    fn add(self, other: CostFactors) -> CostFactors {
        CostFactors {
            total: self.total + other.total,
            investment: self.investment + other.investment,
            replacement: self.replacement + other.replacement,
            om: self.om + other.om,
            fuel: self.fuel + other.fuel,
            salvage: self.salvage + other.salvage,
        }
    }
}

/// Cost factors of each microgrid component, the whole system, and the
/// two key economic indicators.
#[derive(Debug, Clone)]
pub struct MicrogridCosts {
    /// Levelized cost of electricity ($/kWh served).
    pub lcoe: f64,
    /// Net present cost of the microgrid ($).
    pub npc: f64,
    /// Costs of all components together.
    pub system: CostFactors,
    /// Generator costs.
    pub generator: CostFactors,
    /// Storage costs.
    pub storage: CostFactors,
    /// PV plant costs.
    pub pv: CostFactors,
    /// Wind plant costs.
    pub wind: CostFactors,
}

impl fmt::Display for MicrogridCosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn row(f: &mut fmt::Formatter<'_>, name: &str, c: &CostFactors) -> fmt::Result {
            writeln!(
                f,
                "{name:<16} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>14.0}",
                c.investment, c.replacement, c.om, c.fuel, c.salvage, c.total
            )
        }

        writeln!(f, "--- Lifecycle costs ---")?;
        writeln!(
            f,
            "{:<16} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
            "", "Investment", "Replacement", "O&M", "Fuel", "Salvage", "Total"
        )?;
        row(f, "Generator", &self.generator)?;
        row(f, "Storage", &self.storage)?;
        row(f, "Solar PV", &self.pv)?;
        row(f, "Wind power", &self.wind)?;
        row(f, "All components", &self.system)?;
        writeln!(f, "NPC:  {:.0}", self.npc)?;
        write!(f, "LCOE: {:.4} per kWh", self.lcoe)
    }
}

/// Evaluates the economic performance of a microgrid from its operation
/// statistics.
///
/// Component lifetimes are usage-dependent: the generator wears with
/// operating hours and the battery with cycling, so the replacement
/// schedules follow the simulated operation.
pub fn costs(mg: &Microgrid, stats: &OperationStats) -> MicrogridCosts {
    let project = &mg.project;

    let r#gen = &mg.generator;
    let gen_costs = CostFactors::from_prices(
        project,
        r#gen.power_rated_kw,
        r#gen.lifetime_y(stats.gen_hours),
        r#gen.investment_price,
        r#gen.investment_price * r#gen.replacement_price_ratio,
        r#gen.investment_price * r#gen.salvage_price_ratio,
        r#gen.om_price_hours * stats.gen_hours,
        stats.gen_fuel,
        r#gen.fuel_price,
    );

    let bat = &mg.battery;
    let storage_costs = CostFactors::from_prices(
        project,
        bat.energy_rated_kwh,
        bat.lifetime_y(stats.storage_cycles),
        bat.investment_price,
        bat.investment_price * bat.replacement_price_ratio,
        bat.investment_price * bat.salvage_price_ratio,
        bat.om_price,
        0.0,
        0.0,
    );

    let pv = &mg.pv;
    let pv_costs = CostFactors::from_prices(
        project,
        pv.power_rated_kw,
        pv.lifetime_y,
        pv.investment_price,
        pv.investment_price * pv.replacement_price_ratio,
        pv.investment_price * pv.salvage_price_ratio,
        pv.om_price,
        0.0,
        0.0,
    );

    let wind = &mg.wind;
    let wind_costs = CostFactors::from_prices(
        project,
        wind.power_rated_kw,
        wind.lifetime_y,
        wind.investment_price,
        wind.investment_price * wind.replacement_price_ratio,
        wind.investment_price * wind.salvage_price_ratio,
        wind.om_price,
        0.0,
        0.0,
    );

    let system = gen_costs + storage_costs + pv_costs + wind_costs;
    let npc = system.total;

    // capital recovery factor
    let rate = project.discount_rate;
    let sum_discounts: f64 = (1..=project.lifetime_y as i32)
        .map(|i| 1.0 / (1.0 + rate).powi(i))
        .sum();
    let crf = 1.0 / sum_discounts;
    let annualized_cost = npc * crf;
    let lcoe = if stats.served_energy != 0.0 {
        annualized_cost / stats.served_energy
    } else {
        f64::INFINITY
    };

    MicrogridCosts {
        lcoe,
        npc,
        system,
        generator: gen_costs,
        storage: storage_costs,
        pv: pv_costs,
        wind: wind_costs,
    }
}
