/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: a narrow portrait panel
    Compact,
    /// 60-99 cols
    Normal,
    /// 100-139 cols
    Wide,
    /// 140+ cols: landscape kiosk display
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }

    /// Product cards per row in the tray section
    pub fn cards_per_row(&self) -> usize {
        match self {
            Breakpoint::Compact => 1,
            Breakpoint::Normal => 2,
            Breakpoint::Wide => 3,
            Breakpoint::UltraWide => 4,
        }
    }

    /// Width of the tray sidebar; hidden on compact screens
    pub fn sidebar_width(&self) -> u16 {
        if self.at_least(Breakpoint::Normal) {
            12
        } else {
            0
        }
    }
}
