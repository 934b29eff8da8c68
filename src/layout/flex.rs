//! Flex Layout - Two-pass sizing and alignment for containers.
//!
//! Pass one measures children in order against a shrinking budget. Only the
//! main axis shrinks, so earlier children get first pick of the space and
//! later ones see whatever is left. Pass two places the measured children
//! along each axis according to that axis' [`Alignment`].
//!
//! The container's own extent differs by alignment:
//!
//! - `Start` hugs its children: sum (main) or max (cross) of child sizes.
//! - `Center` and `End` fill the viewport and grow past it on overflow:
//!   `max(viewport, children)`.
//!
//! The asymmetry is intentional and kept as-is. Layouts that rely on a
//! `Start` container filling its parent should wrap it in a `Center`/`End`
//! container instead.
//!
//! Once earlier children use up the main axis, later ones are measured
//! against a budget of 0. A wrapped `Text` child in a full row then fails
//! with [`WrapError::UnbreakableToken`](crate::error::WrapError::UnbreakableToken)
//! unless it uses `UnbreakablePolicy::ForceBreak`.

use taffy::{Point, Size};

use crate::error::Result;
use crate::font::FontRegistry;
use crate::primitives::Component;
use crate::types::{Alignment, Direction};

// =============================================================================
// TYPES
// =============================================================================

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlexLayout {
    pub direction: Direction,
    pub main_axis: Alignment,
    pub cross_axis: Alignment,
}

/// Positions along one axis plus the extent the parent takes on that axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisPlacement {
    pub positions: Vec<f32>,
    pub extent: f32,
}

/// Split a size into (main, cross) for `direction`.
#[inline]
pub fn to_axes(direction: Direction, size: Size<f32>) -> (f32, f32) {
    if direction.is_row() {
        (size.width, size.height)
    } else {
        (size.height, size.width)
    }
}

/// Join (main, cross) back into a point for `direction`.
#[inline]
pub fn from_axes(direction: Direction, main: f32, cross: f32) -> Point<f32> {
    if direction.is_row() {
        Point { x: main, y: cross }
    } else {
        Point { x: cross, y: main }
    }
}

// =============================================================================
// PASS ONE: MEASUREMENT
// =============================================================================

/// Measure children in order, shrinking the main axis by each child's size.
///
/// The remaining budget is clamped at zero once children overflow it.
pub fn measure_children<C: Component>(
    children: &mut [C],
    fonts: &FontRegistry,
    max_viewport: Size<f32>,
    direction: Direction,
) -> Result<Vec<Size<f32>>> {
    let mut remaining = max_viewport;
    let mut sizes = Vec::with_capacity(children.len());

    for child in children.iter_mut() {
        let size = child.measure(fonts, remaining)?;
        match direction {
            Direction::Column => remaining.height = (remaining.height - size.height).max(0.0),
            Direction::Row => remaining.width = (remaining.width - size.width).max(0.0),
        }
        sizes.push(size);
    }

    Ok(sizes)
}

// =============================================================================
// PASS TWO: PLACEMENT
// =============================================================================

/// Place children one after another along the main axis.
pub fn place_main_axis(sizes: &[f32], viewport: f32, alignment: Alignment) -> AxisPlacement {
    let total: f32 = sizes.iter().sum();

    let (start, extent) = match alignment {
        Alignment::Start => (0.0, total),
        Alignment::Center => (viewport / 2.0 - total / 2.0, viewport.max(total)),
        Alignment::End => (viewport - total, viewport.max(total)),
    };

    let mut cursor = start;
    let positions = sizes
        .iter()
        .map(|size| {
            let position = cursor;
            cursor += size;
            position
        })
        .collect();

    AxisPlacement { positions, extent }
}

/// Place each child on the cross axis using only its own size.
pub fn place_cross_axis(sizes: &[f32], viewport: f32, alignment: Alignment) -> AxisPlacement {
    let largest = sizes.iter().copied().fold(0.0f32, f32::max);

    let positions = sizes
        .iter()
        .map(|&size| match alignment {
            Alignment::Start => 0.0,
            Alignment::Center => viewport / 2.0 - size / 2.0,
            Alignment::End => viewport - size,
        })
        .collect();

    let extent = match alignment {
        Alignment::Start => largest,
        Alignment::Center | Alignment::End => viewport.max(largest),
    };

    AxisPlacement { positions, extent }
}

/// Measure and place `children`, returning the container's size.
///
/// Each child gets its local position through `set_position`. The caller
/// still has to push its own absolute position down as their offset.
pub fn layout_children<C: Component>(
    layout: &FlexLayout,
    children: &mut [C],
    fonts: &FontRegistry,
    max_viewport: Size<f32>,
) -> Result<Size<f32>> {
    let sizes = measure_children(children, fonts, max_viewport, layout.direction)?;

    let (main_sizes, cross_sizes): (Vec<f32>, Vec<f32>) = sizes
        .iter()
        .map(|&size| to_axes(layout.direction, size))
        .unzip();
    let (main_viewport, cross_viewport) = to_axes(layout.direction, max_viewport);

    let main = place_main_axis(&main_sizes, main_viewport, layout.main_axis);
    let cross = place_cross_axis(&cross_sizes, cross_viewport, layout.cross_axis);

    for ((child, &main_pos), &cross_pos) in children
        .iter_mut()
        .zip(&main.positions)
        .zip(&cross.positions)
    {
        child.set_position(from_axes(layout.direction, main_pos, cross_pos));
    }

    let size = match layout.direction {
        Direction::Column => Size {
            width: cross.extent,
            height: main.extent,
        },
        Direction::Row => Size {
            width: main.extent,
            height: cross.extent,
        },
    };

    tracing::trace!(
        children = children.len(),
        width = size.width,
        height = size.height,
        "laid out children"
    );

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::testing::FixedNode;
    use proptest::prelude::*;

    const VIEWPORT: Size<f32> = Size {
        width: 800.0,
        height: 600.0,
    };

    fn setup(widths: &[f32]) -> (FontRegistry, Vec<FixedNode>) {
        let nodes = widths.iter().map(|&w| FixedNode::new(w, 32.0)).collect();
        (FontRegistry::new(), nodes)
    }

    fn run(
        direction: Direction,
        main_axis: Alignment,
        cross_axis: Alignment,
        widths: &[f32],
    ) -> (Size<f32>, Vec<Point<f32>>) {
        let (fonts, mut nodes) = setup(widths);
        let layout = FlexLayout {
            direction,
            main_axis,
            cross_axis,
        };
        let size = layout_children(&layout, &mut nodes, &fonts, VIEWPORT).unwrap();
        (size, nodes.iter().map(|n| n.position()).collect())
    }

    fn p(x: f32, y: f32) -> Point<f32> {
        Point { x, y }
    }

    #[test]
    fn test_column_start_start() {
        let (size, pos) = run(Direction::Column, Alignment::Start, Alignment::Start, &[131.0, 170.0, 432.0]);
        assert_eq!(pos, vec![p(0.0, 0.0), p(0.0, 32.0), p(0.0, 64.0)]);
        assert_eq!(size, Size { width: 432.0, height: 96.0 });
    }

    #[test]
    fn test_column_main_center_and_end() {
        let (size, pos) = run(Direction::Column, Alignment::Center, Alignment::Start, &[131.0, 170.0, 432.0]);
        assert_eq!(pos, vec![p(0.0, 252.0), p(0.0, 284.0), p(0.0, 316.0)]);
        assert_eq!(size.height, 600.0);

        let (_, pos) = run(Direction::Column, Alignment::End, Alignment::Start, &[131.0, 170.0, 432.0]);
        assert_eq!(pos, vec![p(0.0, 504.0), p(0.0, 536.0), p(0.0, 568.0)]);
    }

    #[test]
    fn test_column_cross_center_and_end() {
        let (size, pos) = run(Direction::Column, Alignment::Start, Alignment::Center, &[131.0, 170.0, 432.0]);
        assert_eq!(pos, vec![p(334.5, 0.0), p(315.0, 32.0), p(184.0, 64.0)]);
        assert_eq!(size, Size { width: 800.0, height: 96.0 });

        let (_, pos) = run(Direction::Column, Alignment::Start, Alignment::End, &[131.0, 170.0, 432.0]);
        assert_eq!(pos, vec![p(669.0, 0.0), p(630.0, 32.0), p(368.0, 64.0)]);
    }

    #[test]
    fn test_row_placements() {
        let widths = [131.0, 170.0, 432.0];

        let (size, pos) = run(Direction::Row, Alignment::Start, Alignment::Start, &widths);
        assert_eq!(pos, vec![p(0.0, 0.0), p(131.0, 0.0), p(301.0, 0.0)]);
        assert_eq!(size, Size { width: 733.0, height: 32.0 });

        let (_, pos) = run(Direction::Row, Alignment::Center, Alignment::Start, &widths);
        assert_eq!(pos, vec![p(33.5, 0.0), p(164.5, 0.0), p(334.5, 0.0)]);

        let (_, pos) = run(Direction::Row, Alignment::End, Alignment::Start, &widths);
        assert_eq!(pos, vec![p(67.0, 0.0), p(198.0, 0.0), p(368.0, 0.0)]);

        let (_, pos) = run(Direction::Row, Alignment::Start, Alignment::Center, &widths);
        assert_eq!(pos, vec![p(0.0, 284.0), p(131.0, 284.0), p(301.0, 284.0)]);

        let (_, pos) = run(Direction::Row, Alignment::Start, Alignment::End, &widths);
        assert_eq!(pos, vec![p(0.0, 568.0), p(131.0, 568.0), p(301.0, 568.0)]);
    }

    #[test]
    fn test_row_center_three_children() {
        let (size, pos) = run(Direction::Row, Alignment::Center, Alignment::Start, &[131.0, 170.0, 170.0]);
        assert_eq!(pos, vec![p(164.5, 0.0), p(295.5, 0.0), p(465.5, 0.0)]);
        assert_eq!(size, Size { width: 800.0, height: 32.0 });
    }

    #[test]
    fn test_main_axis_budget_shrinks() {
        let (fonts, mut nodes) = setup(&[300.0, 300.0, 300.0]);
        let sizes = measure_children(&mut nodes, &fonts, VIEWPORT, Direction::Row).unwrap();
        assert_eq!(sizes.len(), 3);

        let budgets: Vec<Size<f32>> = nodes.iter().map(|n| n.last_viewport).collect();
        assert_eq!(budgets[0], Size { width: 800.0, height: 600.0 });
        assert_eq!(budgets[1], Size { width: 500.0, height: 600.0 });
        assert_eq!(budgets[2], Size { width: 200.0, height: 600.0 });
    }

    #[test]
    fn test_budget_clamped_at_zero() {
        let (fonts, mut nodes) = setup(&[900.0, 10.0]);
        measure_children(&mut nodes, &fonts, VIEWPORT, Direction::Row).unwrap();
        assert_eq!(nodes[1].last_viewport.width, 0.0);
    }

    #[test]
    fn test_overflow_grows_center() {
        let (size, pos) = run(Direction::Row, Alignment::Center, Alignment::Start, &[500.0, 500.0]);
        assert_eq!(size.width, 1000.0);
        assert_eq!(pos[0].x, -100.0);
    }

    #[test]
    fn test_no_children() {
        let (size, _) = run(Direction::Column, Alignment::Start, Alignment::Start, &[]);
        assert_eq!(size, Size::ZERO);
        let (size, _) = run(Direction::Column, Alignment::End, Alignment::Center, &[]);
        assert_eq!(size, VIEWPORT);
    }

    fn alignment() -> impl Strategy<Value = Alignment> {
        prop_oneof![Just(Alignment::Start), Just(Alignment::Center), Just(Alignment::End)]
    }

    proptest! {
        #[test]
        fn test_extent_rules(
            sizes in prop::collection::vec(0.0f32..400.0, 0..6),
            viewport in 0.0f32..1000.0,
            align in alignment(),
        ) {
            let total: f32 = sizes.iter().sum();
            let largest = sizes.iter().copied().fold(0.0f32, f32::max);

            let main = place_main_axis(&sizes, viewport, align);
            let cross = place_cross_axis(&sizes, viewport, align);
            match align {
                Alignment::Start => {
                    prop_assert_eq!(main.extent, total);
                    prop_assert_eq!(cross.extent, largest);
                }
                _ => {
                    prop_assert_eq!(main.extent, viewport.max(total));
                    prop_assert_eq!(cross.extent, viewport.max(largest));
                }
            }
            prop_assert_eq!(main.positions.len(), sizes.len());
        }
    }
}
