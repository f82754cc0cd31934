// coincidence tolerance used when none is given, exact equality
pub const DEFAULT_MERGE_TOLERANCE: f64 = 0.;

// upper bound on crossing resolution rounds, snapping makes the rounds
// converge after a pass or two
pub const MAX_SPLIT_PASSES: usize = 8;

// crossing points snap onto a vertex closer than this fraction of the largest
// coordinate magnitude, a few thousand ulps
pub const CROSSING_SNAP_RELATIVE: f64 = 1e-12;

pub const SMS_2DM_FORMAT: &str = "2DM";
pub const SMS_2DM_EXTENSION: &str = "2dm";
