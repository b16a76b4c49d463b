use ratatui::layout::Rect;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 24;

const TOP_Y: u16 = 2;
const TOP_HEIGHT: u16 = 17;
const SIDE_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    /// Outer frame around all panels.
    pub shell: Rect,
    pub vitals: Rect,
    pub network: Rect,
    pub consumers: Rect,
    pub ticker: Rect,
    pub footer: Rect,
}

/// Single row at the bottom of `area`, below the shell.
pub fn footer_row(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        area.height.min(1),
    )
}

/// Split `area` into the fixed panel grid, or `None` when it is smaller than
/// [`MIN_WIDTH`] x [`MIN_HEIGHT`].
///
/// The top band is a fixed 17 rows; left and right columns meet at the
/// horizontal midpoint with a one column gutter; the bottom band takes what is
/// left above the shell border and footer.
pub fn compute_layout(area: Rect) -> Option<PaneLayout> {
    let (w, h) = (area.width, area.height);
    if w < MIN_WIDTH || h < MIN_HEIGHT {
        return None;
    }

    let half = w / 2;
    let left_x = area.x + SIDE_MARGIN;
    let left_w = half - SIDE_MARGIN;
    let right_x = area.x + half + 1;
    let right_w = half - 3;

    let top_y = area.y + TOP_Y;
    let bottom_y = top_y + TOP_HEIGHT;
    let bottom_h = h - (TOP_Y + TOP_HEIGHT) - 2;

    Some(PaneLayout {
        shell: Rect::new(area.x, area.y, w, h - 1),
        vitals: Rect::new(left_x, top_y, left_w, TOP_HEIGHT),
        network: Rect::new(right_x, top_y, right_w, TOP_HEIGHT),
        consumers: Rect::new(left_x, bottom_y, left_w, bottom_h),
        ticker: Rect::new(right_x, bottom_y, right_w, bottom_h),
        footer: footer_row(area),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(l: &PaneLayout) -> [Rect; 4] {
        [l.vitals, l.network, l.consumers, l.ticker]
    }

    #[test]
    fn preferred_size_geometry() {
        let l = compute_layout(Rect::new(0, 0, 120, 38)).unwrap();
        assert_eq!(l.shell, Rect::new(0, 0, 120, 37));
        assert_eq!(l.vitals, Rect::new(2, 2, 58, 17));
        assert_eq!(l.network, Rect::new(61, 2, 57, 17));
        assert_eq!(l.consumers, Rect::new(2, 19, 58, 17));
        assert_eq!(l.ticker, Rect::new(61, 19, 57, 17));
        assert_eq!(l.footer, Rect::new(0, 37, 120, 1));
    }

    #[test]
    fn below_minimum_has_no_layout() {
        assert!(compute_layout(Rect::new(0, 0, MIN_WIDTH - 1, 38)).is_none());
        assert!(compute_layout(Rect::new(0, 0, 120, MIN_HEIGHT - 1)).is_none());
        assert!(compute_layout(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT)).is_some());
    }

    #[test]
    fn panels_never_overlap_and_stay_inside_shell() {
        for w in MIN_WIDTH..=220 {
            for h in MIN_HEIGHT..=90 {
                let area = Rect::new(0, 0, w, h);
                let l = compute_layout(area).unwrap();
                let shell_inner = Rect::new(1, 1, l.shell.width - 2, l.shell.height - 2);
                let ps = panels(&l);

                for (i, a) in ps.iter().enumerate() {
                    assert!(a.width > 0 && a.height > 0, "{w}x{h}: empty panel {i}");
                    assert_eq!(shell_inner.union(*a), shell_inner, "{w}x{h}: panel {i} escapes");
                    for b in &ps[i + 1..] {
                        assert!(!a.intersects(*b), "{w}x{h}: {a:?} overlaps {b:?}");
                    }
                }
                assert!(!l.shell.intersects(l.footer));
            }
        }
    }

    #[test]
    fn offset_area_shifts_panels() {
        let l = compute_layout(Rect::new(5, 3, 120, 38)).unwrap();
        assert_eq!(l.vitals, Rect::new(7, 5, 58, 17));
        assert_eq!(l.footer, Rect::new(5, 40, 120, 1));
    }
}
