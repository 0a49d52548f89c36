//! Load-following energy dispatch rule.

/// Power split decided for one step.
///
/// Storage power uses the generator convention: positive when
/// discharging, negative when charging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchDecision {
    /// Power supplied by the dispatchable generator (kW, >= 0).
    pub gen_kw: f64,
    /// Power supplied by the storage (kW; positive=discharge, negative=charge).
    pub storage_kw: f64,
    /// Spilled power, curtailed from the renewable potential (kW, >= 0).
    pub spilled_kw: f64,
    /// Shed power, not served to the load (kW, >= 0).
    pub shed_kw: f64,
}

/// Decides the energy dispatch for one step, load-following style.
///
/// The net load request is the desired load minus the renewable
/// potential; renewables implicitly feed the load first. A positive
/// request is served by the storage first and then by the generator,
/// with any remainder shed. A negative request (renewable excess)
/// charges the storage first, with any remainder spilled.
///
/// # Arguments
///
/// * `net_load_kw` - Requested net load (kW, any sign)
/// * `charge_max_kw` - Maximum storage charge power for this step (kW, <= 0)
/// * `discharge_max_kw` - Maximum storage discharge power for this step (kW, >= 0)
/// * `gen_max_kw` - Rated power of the dispatchable generator (kW)
pub fn dispatch(
    net_load_kw: f64,
    charge_max_kw: f64,
    discharge_max_kw: f64,
    gen_max_kw: f64,
) -> DispatchDecision {
    let mut d = DispatchDecision {
        gen_kw: 0.0,
        storage_kw: 0.0,
        spilled_kw: 0.0,
        shed_kw: 0.0,
    };

    if net_load_kw >= 0.0 {
        // Load excess: storage discharges first, then the generator.
        if net_load_kw >= discharge_max_kw {
            d.storage_kw = discharge_max_kw;
            let residual = net_load_kw - d.storage_kw;
            if residual >= gen_max_kw {
                d.gen_kw = gen_max_kw;
                d.shed_kw = residual - gen_max_kw;
            } else {
                d.gen_kw = residual;
            }
        } else {
            d.storage_kw = net_load_kw;
        }
    } else {
        // Renewable excess: charge the storage, spill the rest.
        if net_load_kw >= charge_max_kw {
            d.storage_kw = net_load_kw;
        } else {
            d.storage_kw = charge_max_kw;
            d.spilled_kw = d.storage_kw - net_load_kw;
        }
    }

    d
}
