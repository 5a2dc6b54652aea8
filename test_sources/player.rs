use gdnative::{Signal, SignalArgument, Variant, VariantType};

/// The controllable character.
///
/// godot::register as PLAYER
pub struct Player {
    base: godot::Reference,
    #[godot(hint = "range", hint_string = "0,100", usage = "Default")]
    pub hp: i64,
    /// godot::export as walk_speed
    speed: f64,
    #[godot(-)]
    pub scratch: Vec<u8>,
    pub inventory: Vec<String>,
    pub hit: Signal,
}

impl Player {
    /// godot::constructor(Player)
    pub fn new() -> Box<Self> {
        Box::new(Self {
            base: godot::Reference::default(),
            hp: 100,
            speed: 4.5,
            scratch: Vec::new(),
            inventory: Vec::new(),
            hit: Signal {
                name: "hit".into(),
                args: vec![SignalArgument::new("damage", VariantType::Int)],
                default_args: vec![Variant::Int(1)],
            },
        })
    }

    pub fn get_hp(&self) -> i64 {
        self.hp
    }

    pub fn position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    pub fn take_damage(&mut self, amount: i64, source: &godot::Node) {
        self.hp -= amount;
    }

    fn recompute(&mut self) {}
}

impl Default for Player {
    fn default() -> Self {
        Player {
            base: godot::Reference::default(),
            hp: 100,
            speed: 4.5,
            scratch: Vec::new(),
            inventory: Vec::new(),
            hit: gdnative::Signal {
                name: "hit".into(),
                args: vec![],
                default_args: vec![],
            },
        }
    }
}

impl godot::Ready for Player {
    /// godot::export
    fn v_ready(&mut self) {}
}

/// godot::destructor(Player)
pub fn free_player() {}
