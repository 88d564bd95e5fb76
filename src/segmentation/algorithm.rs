use crate::clock::{clamp_time, midpoint_time, rel_minutes, rel_to_clock, ClockTime};
use crate::models::{Segment, SegmentField, Timer};
use crate::segmentation::config::SegmentationConfig;

/// Fresh timer over the configured default window with a single segment.
pub fn create_timer(config: &SegmentationConfig) -> Timer {
    Timer::new(
        config.default_timer_name.clone(),
        config.default_start,
        config.default_end,
        SegmentationConfig::segment_title(1),
        config.color_for(0),
    )
}

pub fn rename_timer(timer: &Timer, name: &str) -> Timer {
    Timer {
        name: name.to_string(),
        ..timer.clone()
    }
}

/// Splits the last segment in two at its midpoint. The new half becomes the
/// last segment and keeps the original end; the timer end does not move.
/// A last segment shorter than two minutes cannot be split and is left alone.
pub fn add_segment(timer: &Timer, config: &SegmentationConfig) -> Timer {
    let mut next = timer.clone();
    let last = timer.last_index();
    let Some(tail) = timer.segments.get(last) else {
        return next;
    };

    let prev_start = timer.segment_start(last);
    if rel_minutes(prev_start, tail.end) < 2 {
        return next;
    }

    next.segments[last].end = midpoint_time(prev_start, tail.end);
    next.segments.push(Segment::new(
        SegmentationConfig::segment_title(timer.segments.len() + 1),
        config.color_for(timer.segments.len()),
        tail.end,
    ));
    next
}

/// Drops a segment. Removing the tail pulls the timer end back to the new
/// last boundary; removing anything else lets the following segment absorb
/// the freed span. The only remaining segment is never removed.
pub fn remove_segment(timer: &Timer, segment_id: &str) -> Timer {
    let mut next = timer.clone();
    if timer.segments.len() <= 1 {
        return next;
    }
    let Some(index) = timer.segment_index(segment_id) else {
        return next;
    };

    next.segments.remove(index);
    if index == timer.last_index() {
        if let Some(last) = next.segments.last() {
            next.end = last.end;
        }
    }
    next
}

/// Moves the timer start, keeping every boundary at its absolute time unless
/// the new start swallows it.
///
/// A start that lands inside the window at or past the first boundary pushes
/// that boundary `start_push_minutes` past the new start (capped at the timer
/// end); later boundaries the move swallowed are pulled up to the one-minute
/// floor behind it. The timer end never moves: a start so close to the end
/// that the segments could not keep one minute each is clamped back until
/// they fit. A start beyond the window end is read as moving the start
/// earlier, which only lengthens the first segment.
pub fn set_start(timer: &Timer, new_start: ClockTime, config: &SegmentationConfig) -> Timer {
    let mut next = timer.clone();
    next.start = new_start;

    let shift = timer.offset_of(new_start);
    let total = timer.total_minutes();
    let count = timer.segments.len() as i64;
    if shift == 0 || shift > total || count == 0 {
        return next;
    }

    let shift = shift.min(total - count);
    let new_start = rel_to_clock(timer.start, shift);
    next.start = new_start;
    let span = total - shift;

    let mut offsets: Vec<i64> = timer
        .segments
        .iter()
        .map(|segment| timer.offset_of(segment.end) - shift)
        .collect();

    if let Some(first) = offsets.first_mut() {
        if *first <= 0 {
            *first = config.start_push_minutes.min(span);
        }
    }

    let mut previous = 0;
    for offset in offsets.iter_mut() {
        if *offset <= previous {
            *offset = previous + 1;
        }
        previous = *offset;
    }

    // leave room for one minute per later segment before the end
    for (index, offset) in offsets.iter_mut().enumerate() {
        let remaining = count - 1 - index as i64;
        *offset = (*offset).min(span - remaining);
    }

    for (segment, offset) in next.segments.iter_mut().zip(&offsets) {
        segment.end = rel_to_clock(new_start, *offset);
    }
    if let Some(last) = next.segments.last() {
        next.end = last.end;
    }
    next
}

/// Moves the timer end (and with it the last boundary), never closer than one
/// minute after the last segment's start.
pub fn set_end(timer: &Timer, new_end: ClockTime) -> Timer {
    let mut next = timer.clone();
    let last = timer.last_index();
    if timer.segments.is_empty() {
        return next;
    }

    let floor = timer.offset_of(timer.segment_start(last)) + 1;
    let offset = timer.offset_of(new_end).max(floor);
    let end = rel_to_clock(timer.start, offset);

    next.end = end;
    next.segments[last].end = end;
    next
}

pub fn set_segment_field(timer: &Timer, segment_id: &str, field: &SegmentField) -> Timer {
    let Some(index) = timer.segment_index(segment_id) else {
        return timer.clone();
    };

    match field {
        SegmentField::End(value) => set_segment_end(timer, index, clamp_time(value)),
        SegmentField::Title(title) => {
            let mut next = timer.clone();
            next.segments[index].title = title.clone();
            next
        }
        SegmentField::Color(color) => {
            let mut next = timer.clone();
            next.segments[index].color = color.clone();
            next
        }
    }
}

/// Keeps a boundary strictly between its own start and the following
/// segment's end. Moving the last boundary moves the timer end too.
fn set_segment_end(timer: &Timer, index: usize, value: ClockTime) -> Timer {
    let mut next = timer.clone();

    let floor = timer.offset_of(timer.segment_start(index)) + 1;
    let mut offset = timer.offset_of(value).max(floor);
    if let Some(following) = timer.segments.get(index + 1) {
        offset = offset.min(timer.offset_of(following.end) - 1);
    }

    let end = rel_to_clock(timer.start, offset);
    next.segments[index].end = end;
    if index == timer.last_index() {
        next.end = end;
    }
    next
}

/// Brings a timer from untrusted storage back into shape: an empty segment
/// list gets one default segment, boundaries that do not advance are pushed to
/// the one-minute floor, and the timer end follows the last boundary.
pub fn repair_timer(timer: &Timer, config: &SegmentationConfig) -> Timer {
    let mut next = timer.clone();
    if next.segments.is_empty() {
        next.segments.push(Segment::new(
            SegmentationConfig::segment_title(1),
            config.color_for(0),
            timer.end,
        ));
    }

    let start = next.start;
    let mut previous = 0;
    for segment in next.segments.iter_mut() {
        let mut offset = rel_minutes(start, segment.end);
        if offset <= previous {
            offset = previous + 1;
        }
        segment.end = rel_to_clock(start, offset);
        previous = offset;
    }

    if let Some(last) = next.segments.last() {
        next.end = last.end;
    }
    next
}
