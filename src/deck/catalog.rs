//! Built-in case lists. The order here is the order of the toggle list.

pub const OLL_CASES: &[&str] = &[
    "antisune.png",
    "H.png",
    "L.png",
    "pi.png",
    "sune.png",
    "T.png",
    "U.png",
];

pub const PLL_CASES: &[&str] = &[
    "diagonal.png",
    "headlights.png",
    "H.png",
    "Ua.png",
    "Ub.png",
    "Z.png",
];
