use crossterm::terminal;
use ratatui_image::picker::{Capability, Picker, ProtocolType};

/// Rebuilds `picker` when the terminal reports a more accurate cell size
/// than the one it was queried with.
pub(crate) fn picker_with_resolved_cell_size(picker: Picker, protocol_type: ProtocolType) -> Picker {
    let queried = picker.font_size();
    let resolved = terminal::window_size()
        .ok()
        .and_then(|window| {
            cell_size_from_window_metrics(window.width, window.height, window.columns, window.rows)
        })
        .or_else(|| reported_cell_size(&picker))
        .unwrap_or(queried);
    if resolved == queried {
        return picker;
    }

    #[allow(deprecated)]
    let mut rebuilt = Picker::from_fontsize(resolved);
    rebuilt.set_protocol_type(protocol_type);
    rebuilt
}

fn reported_cell_size(picker: &Picker) -> Option<(u16, u16)> {
    picker.capabilities().iter().find_map(|cap| match cap {
        Capability::CellSize(Some((width, height))) if *width > 0 && *height > 0 => {
            Some((*width, *height))
        }
        _ => None,
    })
}

pub(crate) fn cell_size_from_window_metrics(
    width_px: u16,
    height_px: u16,
    columns: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if columns == 0 || rows == 0 {
        return None;
    }
    let cell = (width_px / columns, height_px / rows);
    (cell.0 > 0 && cell.1 > 0).then_some(cell)
}

pub(crate) fn protocol_type_label(protocol: ProtocolType) -> &'static str {
    match protocol {
        ProtocolType::Halfblocks => "halfblocks",
        ProtocolType::Sixel => "sixel",
        ProtocolType::Kitty => "kitty",
        ProtocolType::Iterm2 => "iterm2",
    }
}

#[cfg(test)]
mod tests {
    use super::cell_size_from_window_metrics;

    #[test]
    fn cell_size_divides_window_pixels_by_grid() {
        assert_eq!(cell_size_from_window_metrics(800, 480, 100, 24), Some((8, 20)));
    }

    #[test]
    fn cell_size_rejects_missing_metrics() {
        assert_eq!(cell_size_from_window_metrics(0, 0, 100, 24), None);
        assert_eq!(cell_size_from_window_metrics(800, 480, 0, 24), None);
    }
}
