use validator::Validate;

use super::{
    BorderSide, FrameError, FrameTopology, LedPlacement, Location, SampleRect, SamplingParameters,
};

/// Assigns sequence numbers to LEDs in visitation order
struct SequenceCounter {
    current: u32,
    total: u32,
    clockwise: bool,
}

impl SequenceCounter {
    fn new(topology: &FrameTopology, total: u32) -> Self {
        // Sequence number of the first visited position, i.e. the top-left corner
        let start =
            (i64::from(total) - i64::from(topology.first_led_offset)).rem_euclid(i64::from(total));

        Self {
            current: start as u32,
            total,
            clockwise: topology.clockwise,
        }
    }

    fn next(&mut self) -> u32 {
        let current = self.current;

        self.current = if self.clockwise {
            (current + 1) % self.total
        } else if current == 0 {
            self.total - 1
        } else {
            current - 1
        };

        current
    }
}

struct FrameParams {
    ledstop: u32,
    ledsbottom: u32,
    ledsleft: u32,
    ledsright: u32,
    topleft: bool,
    topright: bool,
    bottomleft: bool,
    bottomright: bool,
    hgap: f64,
    vgap: f64,
    hdepth: f64,
    vdepth: f64,
    /// Half width of the sampled area of a top or bottom LED
    half_width: f64,
    /// Half height of the sampled area of a left or right LED
    half_height: f64,
}

impl FrameParams {
    fn new(topology: &FrameTopology, sampling: &SamplingParameters) -> Self {
        let hgap = sampling.horizontal_gap;
        let vgap = sampling.vertical_gap;
        let overlap = 1. + sampling.overlap_fraction;

        // Left and right LEDs share the left edge spacing, unless there are none on that side
        let ledsvert = if topology.left_count > 0 {
            topology.left_count
        } else {
            topology.right_count
        };

        Self {
            ledstop: topology.top_count,
            ledsbottom: topology.bottom_count,
            ledsleft: topology.left_count,
            ledsright: topology.right_count,
            topleft: topology.top_left_corner,
            topright: topology.top_right_corner,
            bottomleft: topology.bottom_left_corner,
            bottomright: topology.bottom_right_corner,
            hgap,
            vgap,
            hdepth: sampling.horizontal_depth.min(1. - hgap),
            vdepth: sampling.vertical_depth.min(1. - vgap),
            half_width: Self::half_extent(vgap, topology.top_count, overlap),
            half_height: Self::half_extent(hgap, ledsvert, overlap),
        }
    }

    fn half_extent(gap: f64, count: u32, overlap: f64) -> f64 {
        if count == 0 {
            0.
        } else {
            (1. - 2. * gap) / f64::from(count) * overlap / 2.
        }
    }

    fn sample_rect(&self, side: BorderSide, location: Location) -> SampleRect {
        // Center of the sampled area once the gaps are removed
        let x = self.vgap + (1. - 2. * self.vgap) * location.x;
        let y = self.hgap + (1. - 2. * self.hgap) * location.y;

        let left = self.vgap;
        let right = 1. - self.vgap - self.vdepth;
        let top = self.hgap;
        let bottom = 1. - self.hgap - self.hdepth;

        let (xmin, ymin, xmax, ymax) = match side {
            BorderSide::TopLeft => (left, top, left + self.vdepth, top + self.hdepth),
            BorderSide::TopRight => (right, top, right + self.vdepth, top + self.hdepth),
            BorderSide::BottomRight => (right, bottom, right + self.vdepth, bottom + self.hdepth),
            BorderSide::BottomLeft => (left, bottom, left + self.vdepth, bottom + self.hdepth),
            BorderSide::Top => (
                x - self.half_width,
                top,
                x + self.half_width,
                top + self.hdepth,
            ),
            BorderSide::Bottom => (
                x - self.half_width,
                bottom,
                x + self.half_width,
                bottom + self.hdepth,
            ),
            BorderSide::Left => (
                left,
                y - self.half_height,
                left + self.vdepth,
                y + self.half_height,
            ),
            BorderSide::Right => (
                right,
                y - self.half_height,
                right + self.vdepth,
                y + self.half_height,
            ),
        };

        SampleRect::from_bounds(xmin, xmax, ymin, ymax)
    }

    fn create_led(&self, sequence_number: u32, side: BorderSide, x: f64, y: f64) -> LedPlacement {
        let location = Location::new(x, y);
        let led = LedPlacement {
            sequence_number,
            side,
            location,
            sample_rect: self.sample_rect(side, location),
        };

        trace!(
            seq = %led.sequence_number,
            side = %led.side,
            x = %led.location.x,
            y = %led.location.y,
            "placed led",
        );

        led
    }

    fn create_corner(
        &self,
        enabled: bool,
        side: BorderSide,
        (x, y): (f64, f64),
        counter: &mut SequenceCounter,
        leds: &mut Vec<LedPlacement>,
    ) {
        if enabled {
            leds.push(self.create_led(counter.next(), side, x, y));
        }
    }

    fn create_top_leds(&self, counter: &mut SequenceCounter, leds: &mut Vec<LedPlacement>) {
        let spacing = 1. / f64::from(self.ledstop);

        for i in 0..self.ledstop {
            let x = spacing / 2. + f64::from(i) * spacing;
            leds.push(self.create_led(counter.next(), BorderSide::Top, x, 0.));
        }
    }

    fn create_right_leds(&self, counter: &mut SequenceCounter, leds: &mut Vec<LedPlacement>) {
        let spacing = 1. / f64::from(self.ledsright);

        for i in 0..self.ledsright {
            let y = spacing / 2. + f64::from(i) * spacing;
            leds.push(self.create_led(counter.next(), BorderSide::Right, 1., y));
        }
    }

    fn create_bottom_leds(&self, counter: &mut SequenceCounter, leds: &mut Vec<LedPlacement>) {
        // Bottom LEDs use the top spacing, leaving a gap in the middle
        if self.ledstop == 0 || self.ledsbottom == 0 {
            return;
        }

        let spacing = 1. / f64::from(self.ledstop);

        for i in (0..self.ledstop).rev() {
            if !is_bottom_slot(self.ledstop, self.ledsbottom, i) {
                continue;
            }

            let x = spacing / 2. + f64::from(i) * spacing;
            leds.push(self.create_led(counter.next(), BorderSide::Bottom, x, 1.));
        }
    }

    fn create_left_leds(&self, counter: &mut SequenceCounter, leds: &mut Vec<LedPlacement>) {
        let spacing = 1. / f64::from(self.ledsleft);

        for i in (0..self.ledsleft).rev() {
            let y = spacing / 2. + f64::from(i) * spacing;
            leds.push(self.create_led(counter.next(), BorderSide::Left, 0., y));
        }
    }
}

/// Returns true if the bottom slot `slot`, out of `top` slots, holds one of the `bottom` LEDs
pub fn is_bottom_slot(top: u32, bottom: u32, slot: u32) -> bool {
    bottom > 0 && (slot <= (bottom - 1) / 2 || slot >= top.saturating_sub(bottom / 2))
}

/// Resolve a frame topology and sampling parameters into per-LED placements
///
/// The returned LEDs are sorted by sequence number. An empty frame yields an empty list.
///
/// # Errors
///
/// Returns a [FrameError] if either argument fails validation, in which case no LED is
/// produced.
pub fn construct(
    topology: &FrameTopology,
    sampling: &SamplingParameters,
) -> Result<Vec<LedPlacement>, FrameError> {
    topology.validate().map_err(FrameError::Topology)?;
    sampling.validate().map_err(FrameError::Sampling)?;

    // Validation guarantees the count fits
    let total = topology.total_count() as u32;
    if total == 0 {
        debug!("empty led frame");
        return Ok(Vec::new());
    }

    let params = FrameParams::new(topology, sampling);
    let mut counter = SequenceCounter::new(topology, total);
    let mut leds = Vec::with_capacity(total as usize);

    params.create_corner(
        params.topleft,
        BorderSide::TopLeft,
        (0., 0.),
        &mut counter,
        &mut leds,
    );
    params.create_top_leds(&mut counter, &mut leds);
    params.create_corner(
        params.topright,
        BorderSide::TopRight,
        (1., 0.),
        &mut counter,
        &mut leds,
    );
    params.create_right_leds(&mut counter, &mut leds);
    params.create_corner(
        params.bottomright,
        BorderSide::BottomRight,
        (1., 1.),
        &mut counter,
        &mut leds,
    );
    params.create_bottom_leds(&mut counter, &mut leds);
    params.create_corner(
        params.bottomleft,
        BorderSide::BottomLeft,
        (0., 1.),
        &mut counter,
        &mut leds,
    );
    params.create_left_leds(&mut counter, &mut leds);

    leds.sort_by_key(|led| led.sequence_number);

    debug!(
        leds = %leds.len(),
        clockwise = %topology.clockwise,
        offset = %topology.first_led_offset,
        "constructed led frame",
    );

    Ok(leds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology(top: u32, bottom: u32, left: u32, right: u32) -> FrameTopology {
        FrameTopology {
            top_count: top,
            bottom_count: bottom,
            left_count: left,
            right_count: right,
            ..Default::default()
        }
    }

    #[test]
    fn counter_wraps_clockwise() {
        let mut counter = SequenceCounter::new(&topology(1, 0, 0, 0), 3);

        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.next(), 0);
    }

    #[test]
    fn counter_wraps_counter_clockwise() {
        let topology = FrameTopology {
            clockwise: false,
            first_led_offset: 1,
            ..topology(1, 0, 0, 0)
        };
        let mut counter = SequenceCounter::new(&topology, 3);

        assert_eq!(counter.next(), 2);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 2);
    }

    #[test]
    fn counter_normalizes_offset() {
        for (offset, start) in &[(0, 0), (5, 0), (-1, 1), (1, 4), (12, 3), (-12, 2)] {
            let topology = FrameTopology {
                first_led_offset: *offset,
                ..topology(1, 0, 0, 0)
            };

            assert_eq!(
                SequenceCounter::new(&topology, 5).current,
                *start,
                "offset {}",
                offset
            );
        }
    }

    #[test]
    fn bottom_slots_leave_a_centered_gap() {
        let slots: Vec<_> = (0..10).filter(|&i| is_bottom_slot(10, 4, i)).collect();
        assert_eq!(slots, vec![0, 1, 8, 9]);

        let slots: Vec<_> = (0..10).filter(|&i| is_bottom_slot(10, 5, i)).collect();
        assert_eq!(slots, vec![0, 1, 2, 8, 9]);

        assert!((0..6).all(|i| is_bottom_slot(6, 6, i)));
        assert!((0..6).all(|i| !is_bottom_slot(6, 0, i)));
    }

    #[test]
    fn bottom_leds_are_walked_right_to_left() {
        let mut topology = topology(4, 2, 0, 0);
        topology.set_corners(false);

        let leds = construct(&topology, &SamplingParameters::default()).unwrap();
        let bottom: Vec<_> = leds
            .iter()
            .filter(|led| led.side == BorderSide::Bottom)
            .map(|led| (led.sequence_number, led.location.x))
            .collect();

        assert_eq!(bottom, vec![(4, 0.875), (5, 0.125)]);
    }

    #[test]
    fn right_leds_fall_back_to_own_spacing() {
        let mut topology = topology(0, 0, 0, 2);
        topology.set_corners(false);

        let leds = construct(&topology, &SamplingParameters::default()).unwrap();

        assert_eq!(leds.len(), 2);
        for led in &leds {
            assert!((led.sample_rect.height - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn corners_respect_gaps() {
        let sampling = SamplingParameters {
            horizontal_depth: 0.2,
            vertical_depth: 0.1,
            horizontal_gap: 0.05,
            vertical_gap: 0.1,
            overlap_fraction: 0.,
        };
        let params = FrameParams::new(&topology(4, 4, 2, 2), &sampling);

        let top_left = params.sample_rect(BorderSide::TopLeft, Location::new(0., 0.));
        assert!((top_left.x - 0.1).abs() < 1e-12);
        assert!((top_left.y - 0.05).abs() < 1e-12);
        assert!((top_left.width - 0.1).abs() < 1e-12);
        assert!((top_left.height - 0.2).abs() < 1e-12);

        let bottom_right = params.sample_rect(BorderSide::BottomRight, Location::new(1., 1.));
        assert!((bottom_right.right() - 0.9).abs() < 1e-12);
        assert!((bottom_right.bottom() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn depth_is_limited_by_gap() {
        let sampling = SamplingParameters {
            horizontal_depth: 1.,
            horizontal_gap: 0.25,
            ..Default::default()
        };
        let params = FrameParams::new(&topology(4, 4, 2, 2), &sampling);

        assert!((params.hdepth - 0.75).abs() < 1e-12);

        let top = params.sample_rect(BorderSide::Top, Location::new(0.125, 0.));
        assert!((top.y - 0.25).abs() < 1e-12);
        assert!(top.bottom() <= 1.);
    }
}
