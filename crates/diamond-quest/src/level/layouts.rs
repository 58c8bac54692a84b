//! Hand-authored platform and robot placements for levels 1 to 5.
//!
//! Heights are given as a rise above the bottom of the screen, so
//! `rise: 150` is a platform top at y = SCREEN_HEIGHT - 150.

use crate::actors::RobotKind;
use crate::core::physics::{Rect, SCREEN_HEIGHT};

pub const LEDGE_HEIGHT: f32 = 30.0;

#[derive(Debug, Clone, Copy)]
pub struct LedgeSpec {
    pub x: f32,
    pub rise: f32,
    pub width: f32,
}

impl LedgeSpec {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, SCREEN_HEIGHT - self.rise, self.width, LEDGE_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RobotSpec {
    pub x: f32,
    pub rise: f32,
    pub kind: RobotKind,
}

pub struct Layout {
    pub ledges: &'static [LedgeSpec],
    pub robots: &'static [RobotSpec],
}

const fn ledge(x: f32, rise: f32, width: f32) -> LedgeSpec {
    LedgeSpec { x, rise, width }
}

const fn normal(x: f32, rise: f32) -> RobotSpec {
    RobotSpec {
        x,
        rise,
        kind: RobotKind::Normal,
    }
}

const fn tough(x: f32, rise: f32) -> RobotSpec {
    RobotSpec {
        x,
        rise,
        kind: RobotKind::Tough,
    }
}

static LEVEL_1: Layout = Layout {
    ledges: &[
        ledge(300.0, 150.0, 120.0),
        ledge(600.0, 200.0, 150.0),
        ledge(1000.0, 180.0, 100.0),
        ledge(1300.0, 280.0, 120.0),
        ledge(1600.0, 320.0, 140.0),
        ledge(2000.0, 250.0, 100.0),
        ledge(2300.0, 400.0, 120.0),
    ],
    robots: &[
        normal(350.0, 80.0),
        normal(650.0, 80.0),
        normal(1050.0, 210.0),
        normal(1350.0, 310.0),
        normal(1650.0, 350.0),
        normal(2050.0, 280.0),
    ],
};

static LEVEL_2: Layout = Layout {
    ledges: &[
        ledge(200.0, 120.0, 100.0),
        ledge(400.0, 200.0, 120.0),
        ledge(600.0, 160.0, 80.0),
        ledge(800.0, 280.0, 100.0),
        ledge(1000.0, 220.0, 120.0),
        ledge(1200.0, 350.0, 100.0),
        ledge(1400.0, 180.0, 140.0),
        ledge(1600.0, 400.0, 120.0),
        ledge(1800.0, 300.0, 100.0),
        ledge(2000.0, 450.0, 120.0),
        ledge(2200.0, 250.0, 100.0),
    ],
    robots: &[
        normal(250.0, 80.0),
        normal(450.0, 230.0),
        normal(650.0, 190.0),
        normal(850.0, 310.0),
        normal(1050.0, 250.0),
        normal(1250.0, 380.0),
        normal(1450.0, 210.0),
        normal(1850.0, 330.0),
        normal(2050.0, 480.0),
    ],
};

static LEVEL_3: Layout = Layout {
    ledges: &[
        ledge(150.0, 100.0, 80.0),
        ledge(300.0, 180.0, 100.0),
        ledge(500.0, 260.0, 80.0),
        ledge(700.0, 340.0, 100.0),
        ledge(900.0, 420.0, 80.0),
        ledge(1100.0, 500.0, 100.0),
        ledge(1300.0, 380.0, 120.0),
        ledge(1500.0, 280.0, 100.0),
        ledge(1700.0, 200.0, 80.0),
        ledge(1900.0, 320.0, 100.0),
        ledge(2100.0, 450.0, 120.0),
        ledge(2300.0, 350.0, 100.0),
    ],
    robots: &[
        normal(200.0, 130.0),
        normal(350.0, 210.0),
        normal(550.0, 290.0),
        normal(750.0, 370.0),
        normal(950.0, 450.0),
        normal(1150.0, 530.0),
        normal(1350.0, 410.0),
        normal(1550.0, 310.0),
        normal(1950.0, 350.0),
        normal(2150.0, 480.0),
        normal(2350.0, 380.0),
    ],
};

static LEVEL_4: Layout = Layout {
    ledges: &[
        ledge(100.0, 120.0, 100.0),
        ledge(250.0, 200.0, 80.0),
        ledge(400.0, 150.0, 120.0),
        ledge(600.0, 280.0, 100.0),
        ledge(800.0, 200.0, 80.0),
        ledge(1000.0, 350.0, 120.0),
        ledge(1200.0, 250.0, 100.0),
        ledge(1400.0, 400.0, 80.0),
        ledge(1600.0, 180.0, 120.0),
        ledge(1800.0, 320.0, 100.0),
        ledge(2000.0, 450.0, 120.0),
        ledge(2200.0, 280.0, 100.0),
        ledge(2400.0, 380.0, 80.0),
    ],
    robots: &[
        tough(150.0, 80.0),
        normal(300.0, 230.0),
        tough(450.0, 180.0),
        normal(650.0, 310.0),
        tough(850.0, 230.0),
        normal(1050.0, 380.0),
        tough(1250.0, 280.0),
        normal(1450.0, 430.0),
        tough(1650.0, 210.0),
        normal(1850.0, 350.0),
        tough(2050.0, 480.0),
        normal(2250.0, 310.0),
    ],
};

static LEVEL_5: Layout = Layout {
    ledges: &[
        ledge(80.0, 100.0, 80.0),
        ledge(200.0, 180.0, 60.0),
        ledge(320.0, 260.0, 80.0),
        ledge(480.0, 340.0, 60.0),
        ledge(600.0, 420.0, 80.0),
        ledge(750.0, 500.0, 60.0),
        ledge(900.0, 380.0, 80.0),
        ledge(1050.0, 280.0, 60.0),
        ledge(1200.0, 200.0, 80.0),
        ledge(1350.0, 320.0, 60.0),
        ledge(1500.0, 450.0, 80.0),
        ledge(1650.0, 350.0, 60.0),
        ledge(1800.0, 250.0, 80.0),
        ledge(1950.0, 400.0, 60.0),
        ledge(2100.0, 300.0, 80.0),
        ledge(2250.0, 480.0, 60.0),
        ledge(2400.0, 380.0, 80.0),
    ],
    robots: &[
        tough(130.0, 80.0),
        tough(250.0, 210.0),
        tough(370.0, 290.0),
        tough(530.0, 370.0),
        tough(650.0, 450.0),
        tough(800.0, 530.0),
        tough(950.0, 410.0),
        tough(1100.0, 310.0),
        tough(1250.0, 230.0),
        tough(1400.0, 350.0),
        tough(1550.0, 480.0),
        tough(1700.0, 380.0),
        tough(1850.0, 280.0),
        tough(2000.0, 430.0),
        tough(2150.0, 330.0),
        tough(2300.0, 510.0),
    ],
};

/// Layout for `level`, clamped into 1..=5.
pub fn layout(level: u32) -> &'static Layout {
    match level {
        0 | 1 => &LEVEL_1,
        2 => &LEVEL_2,
        3 => &LEVEL_3,
        4 => &LEVEL_4,
        _ => &LEVEL_5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        let counts: Vec<(usize, usize)> = (1..=5)
            .map(|n| (layout(n).ledges.len(), layout(n).robots.len()))
            .collect();
        assert_eq!(counts, vec![(7, 6), (11, 9), (12, 11), (13, 12), (17, 16)]);
    }

    #[test]
    fn level_four_alternates_starting_tough() {
        let kinds: Vec<RobotKind> = layout(4).robots.iter().map(|r| r.kind).collect();
        for (i, kind) in kinds.iter().enumerate() {
            let expected = if i % 2 == 0 {
                RobotKind::Tough
            } else {
                RobotKind::Normal
            };
            assert_eq!(*kind, expected);
        }
        assert!(layout(5).robots.iter().all(|r| r.kind == RobotKind::Tough));
    }

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(layout(0).robots.len(), 6);
        assert_eq!(layout(9).robots.len(), 16);
    }

    #[test]
    fn ledge_rect_uses_rise() {
        let r = layout(1).ledges[0].rect();
        assert_eq!(r, Rect::new(300.0, 618.0, 120.0, 30.0));
    }
}
