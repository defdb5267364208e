//! Keyboard mapping. The browser delivers `KeyboardEvent.key` strings; anything
//! not listed here is ignored.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
    TogglePause,
}

impl Command {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Command::MoveLeft),
            "ArrowRight" => Some(Command::MoveRight),
            "ArrowDown" => Some(Command::SoftDrop),
            "ArrowUp" => Some(Command::RotateCw),
            "z" | "Z" => Some(Command::RotateCcw),
            " " | "Spacebar" => Some(Command::HardDrop),
            "p" | "P" => Some(Command::TogglePause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::MoveLeft));
        assert_eq!(Command::from_key("ArrowRight"), Some(Command::MoveRight));
        assert_eq!(Command::from_key("ArrowDown"), Some(Command::SoftDrop));
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::RotateCw));
        assert_eq!(Command::from_key(" "), Some(Command::HardDrop));
        assert_eq!(Command::from_key("p"), Some(Command::TogglePause));
        assert_eq!(Command::from_key("P"), Some(Command::TogglePause));
        assert_eq!(Command::from_key("Z"), Some(Command::RotateCcw));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        for key in ["a", "Enter", "Escape", "", "Shift", "pp"] {
            assert_eq!(Command::from_key(key), None, "{key:?}");
        }
    }
}
