use glam::Vec2;
use static_assertions::const_assert_eq;
use std::fmt;

/// Behavioural mode of the avatar.
/// Drives the glow colour and the limb targets of every rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Coding = 0,
    Gaming = 1,
    Writing = 2,
    /// Celebration pose, only entered through an explicit trigger
    Dabbing = 3,
}

impl Mode {
    /// Total number of modes
    pub const COUNT: usize = 4;

    /// Every mode, in table order
    pub const ALL: [Mode; Self::COUNT] = [Mode::Coding, Mode::Gaming, Mode::Writing, Mode::Dabbing];

    /// Modes eligible for the periodic random switch
    pub const AMBIENT: [Mode; 3] = [Mode::Coding, Mode::Gaming, Mode::Writing];

    /// Convert to table index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static pose definition for this mode
    #[inline]
    pub fn def(self) -> &'static ModeDef {
        &MODE_TABLE[self.index()]
    }

    /// CSS colour of the desk and monitor glow
    pub fn color(self) -> &'static str {
        self.def().color
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Coding => "coding",
            Mode::Gaming => "gaming",
            Mode::Writing => "writing",
            Mode::Dabbing => "dabbing",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elbow and hand positions for both arms, relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arms {
    pub left_elbow: Vec2,
    pub left_hand: Vec2,
    pub right_elbow: Vec2,
    pub right_hand: Vec2,
}

/// Per-mode arm animation
#[derive(Debug, Clone, Copy)]
pub enum Motion {
    /// Both hands bob in quadrature (typing)
    Typing { amplitude: f32 },
    /// Right hand jitters sideways at four times the base speed (mouse)
    MouseTwitch { amplitude: f32 },
    /// Left hand drifts slowly at half speed (pen)
    Scribble { amplitude: f32 },
    /// Fixed arm placement, independent of time
    Fixed(Arms),
}

impl Motion {
    /// Apply this motion to the rest arms at the given phase
    pub fn apply(self, rest: Arms, speed: f32) -> Arms {
        match self {
            Motion::Typing { amplitude } => Arms {
                left_hand: rest.left_hand + Vec2::Y * speed.sin() * amplitude,
                right_hand: rest.right_hand + Vec2::Y * speed.cos() * amplitude,
                ..rest
            },
            Motion::MouseTwitch { amplitude } => Arms {
                right_hand: rest.right_hand + Vec2::X * (speed * 4.0).sin() * amplitude,
                ..rest
            },
            Motion::Scribble { amplitude } => Arms {
                left_hand: rest.left_hand + Vec2::Y * (speed * 0.5).sin() * amplitude,
                ..rest
            },
            Motion::Fixed(arms) => arms,
        }
    }
}

/// Static mode definition: colour, torso lean, head offset and arm motion
#[derive(Debug, Clone, Copy)]
pub struct ModeDef {
    pub color: &'static str,
    /// Horizontal spine offset at the neck (positive leans right)
    pub lean: f32,
    pub head_offset: Vec2,
    pub motion: Motion,
}

/// Mode table, indexed by `Mode::index`
pub const MODE_TABLE: [ModeDef; Mode::COUNT] = [
    // Coding - focused typing
    ModeDef {
        color: "#0f0",
        lean: 10.0,
        head_offset: Vec2::ZERO,
        motion: Motion::Typing { amplitude: 3.0 },
    },
    // Gaming - leaning in, neck forward
    ModeDef {
        color: "#0ff",
        lean: 25.0,
        head_offset: Vec2::new(0.0, 5.0),
        motion: Motion::MouseTwitch { amplitude: 2.0 },
    },
    // Writing - slight lean back
    ModeDef {
        color: "#ffb000",
        lean: -5.0,
        head_offset: Vec2::ZERO,
        motion: Motion::Scribble { amplitude: 2.0 },
    },
    // Dabbing - head dropped into the left elbow, right arm pointing up
    ModeDef {
        color: "#ff00ff",
        lean: 30.0,
        head_offset: Vec2::new(15.0, 15.0),
        motion: Motion::Fixed(Arms {
            left_elbow: Vec2::new(10.0, -60.0),
            left_hand: Vec2::new(-20.0, -80.0),
            right_elbow: Vec2::new(50.0, -50.0),
            right_hand: Vec2::new(90.0, -80.0),
        }),
    },
];

const_assert_eq!(Mode::ALL.len(), Mode::COUNT);
const_assert_eq!(Mode::Dabbing as usize, Mode::COUNT - 1);
