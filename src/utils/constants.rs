use crate::utils::constants_config::SimConstants;

pub const DEFAULT_SIM_CONSTANTS: SimConstants = SimConstants {
    g: 1.0,
    softening: 0.01,
    theta: 0.6,
    dt: 1.0e-3,
};
