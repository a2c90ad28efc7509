//! One numeric value seen through two input controls.
//!
//! A calculator field is edited either as free text or with a range slider.
//! Both views write the same underlying value; the text is authoritative
//! (it is what gets parsed), the slider mirrors it within its range.

use std::fmt;

/// Which control produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlView {
    Text,
    Slider,
}

/// Bounds and granularity of a slider control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        SliderRange { min, max, step }
    }

    /// Clamp into range and snap to the nearest step.
    pub fn snap(&self, position: f64) -> f64 {
        if !position.is_finite() {
            return self.min;
        }
        let clamped = position.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        let mut snapped = self.min + steps * self.step;
        if self.step.fract() != 0.0 {
            // 0.1 * 7 = 0.7000000000000001
            snapped = (snapped * 1e10).round() / 1e10;
        }
        snapped.clamp(self.min, self.max)
    }
}

/// Notification sent to subscribers after either view changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub field: &'static str,
    pub source: ControlView,
    pub text: String,
    /// Parsed value, `None` while the text is not a finite number.
    pub value: Option<f64>,
}

type Subscriber = Box<dyn FnMut(&ValueChange)>;

pub struct BoundValue {
    field: &'static str,
    text: String,
    slider: f64,
    range: SliderRange,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundValue")
            .field("field", &self.field)
            .field("text", &self.text)
            .field("slider", &self.slider)
            .field("range", &self.range)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl BoundValue {
    pub fn new(field: &'static str, initial: f64, range: SliderRange) -> Self {
        BoundValue {
            field,
            text: format_number(initial),
            slider: range.snap(initial),
            range,
            subscribers: Vec::new(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn slider(&self) -> f64 {
        self.slider
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    /// Parsed text value; `None` when empty, non-numeric or non-finite.
    pub fn value(&self) -> Option<f64> {
        parse_number(&self.text)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ValueChange) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Edit through the text field. Unparseable text is kept verbatim and the
    /// slider stays where it was.
    pub fn set_text(&mut self, text: impl Into<String>) -> ValueChange {
        self.text = text.into();
        if let Some(v) = self.value() {
            self.slider = self.range.snap(v);
        }
        self.notify(ControlView::Text)
    }

    /// Edit through the slider. The text view is rewritten to the snapped position.
    pub fn set_slider(&mut self, position: f64) -> ValueChange {
        self.slider = self.range.snap(position);
        self.text = format_number(self.slider);
        self.notify(ControlView::Slider)
    }

    /// Write both views at once, e.g. when restoring defaults.
    pub fn reset(&mut self, value: f64) -> ValueChange {
        self.text = format_number(value);
        self.slider = self.range.snap(value);
        self.notify(ControlView::Text)
    }

    fn notify(&mut self, source: ControlView) -> ValueChange {
        let change = ValueChange {
            field: self.field,
            source,
            text: self.text.clone(),
            value: self.value(),
        };
        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
        change
    }
}

/// Leniently parse a control's text: surrounding whitespace is ignored,
/// anything else that is not a finite number is rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TENURE: SliderRange = SliderRange::new(1.0, 30.0, 1.0);

    #[test]
    fn test_slider_updates_text() {
        let mut tenure = BoundValue::new("term_years", 20.0, TENURE);
        let change = tenure.set_slider(12.4);
        assert_eq!(tenure.text(), "12");
        assert_eq!(change.value, Some(12.0));
        assert_eq!(change.source, ControlView::Slider);
    }

    #[test]
    fn test_text_updates_slider_within_range() {
        let mut tenure = BoundValue::new("term_years", 20.0, TENURE);
        tenure.set_text("45");
        assert_eq!(tenure.text(), "45");
        assert_eq!(tenure.value(), Some(45.0));
        assert_eq!(tenure.slider(), 30.0);
    }

    #[test]
    fn test_invalid_text_kept_and_slider_untouched() {
        let mut tenure = BoundValue::new("term_years", 20.0, TENURE);
        let change = tenure.set_text("abc");
        assert_eq!(change.value, None);
        assert_eq!(tenure.text(), "abc");
        assert_eq!(tenure.slider(), 20.0);
    }

    #[test]
    fn test_subscribers_notified_for_both_views() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut principal =
            BoundValue::new("principal", 500_000.0, SliderRange::new(100_000.0, 10_000_000.0, 10_000.0));
        principal.subscribe(move |c| sink.borrow_mut().push((c.source, c.value)));

        principal.set_text("750000");
        principal.set_slider(1_234_567.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (ControlView::Text, Some(750_000.0)));
        assert_eq!(seen[1], (ControlView::Slider, Some(1_230_000.0)));
    }

    #[test]
    fn test_fractional_step_snap() {
        let rate = SliderRange::new(0.0, 20.0, 0.1);
        assert_eq!(rate.snap(0.72), 0.7);
        assert_eq!(rate.snap(8.5), 8.5);
        assert_eq!(rate.snap(-3.0), 0.0);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 8.5 "), Some(8.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
