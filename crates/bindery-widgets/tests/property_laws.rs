#![forbid(unsafe_code)]

//! Property-based laws for the bound property variants.

use std::cell::Cell;
use std::rc::Rc;

use bindery_core::prelude::*;
use bindery_widgets::HeadlessToolkit;
use proptest::prelude::*;

fn counter<P: Property>(p: &P) -> (Rc<Cell<u32>>, Subscription) {
    let hits = Rc::new(Cell::new(0));
    let hits_clone = Rc::clone(&hits);
    let sub = p.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));
    (hits, sub)
}

fn colour() -> impl Strategy<Value = Colour> {
    prop::sample::select(Colour::ALL.to_vec())
}

proptest! {
    #[test]
    fn in_range_values_are_stored_and_shown(
        (min, max, v) in (-1000i64..1000, 0i64..1000)
            .prop_flat_map(|(min, span)| (Just(min), Just(min + span), min..=min + span))
    ) {
        let tk = HeadlessToolkit::new();
        let p = IntProperty::new(&tk, "n", min, min..=max).unwrap();
        p.set_value(v);
        prop_assert_eq!(p.value(), v);
        prop_assert_eq!(p.node().display_value(), v.to_string());
    }

    #[test]
    fn out_of_range_values_land_on_the_nearest_bound(
        min in -1000i64..1000,
        span in 0i64..1000,
        excess in 1i64..1_000_000,
    ) {
        let max = min + span;
        let tk = HeadlessToolkit::new();
        let p = IntProperty::new(&tk, "n", min, min..=max).unwrap();

        p.set_value(max + excess);
        prop_assert_eq!(p.value(), max);
        p.set_value(min - excess);
        prop_assert_eq!(p.value(), min);
    }

    #[test]
    fn fractions_truncate_toward_zero(x in -1.0e9f64..1.0e9) {
        let tk = HeadlessToolkit::new();
        let p = IntProperty::new(&tk, "n", 0, ..).unwrap();
        p.set_value(x);
        prop_assert_eq!(p.value(), x.trunc() as i64);
    }

    #[test]
    fn repeated_int_set_notifies_at_most_once(v in any::<i64>(), start in any::<i64>()) {
        let tk = HeadlessToolkit::new();
        let p = IntProperty::new(&tk, "n", start, ..).unwrap();
        let (hits, _sub) = counter(&p);

        p.set_value(v);
        p.set_value(v);

        let expected = u32::from(v != start);
        prop_assert_eq!(hits.get(), expected);
        prop_assert_eq!(p.version(), u64::from(expected));
    }

    #[test]
    fn any_text_round_trips(s in any::<String>()) {
        let tk = HeadlessToolkit::new();
        let p = TextProperty::new(&tk, "t", "").unwrap();
        p.set_value(s.clone());
        prop_assert_eq!(p.node().display_value(), s.clone());
        prop_assert_eq!(p.value(), s);
    }

    #[test]
    fn repeated_colour_set_notifies_at_most_once(start in colour(), c in colour()) {
        let tk = HeadlessToolkit::new();
        let p = ColourProperty::new(&tk, "fill", start).unwrap();
        let (hits, _sub) = counter(&p);

        p.set_value(c);
        p.set_value(c);

        prop_assert_eq!(hits.get(), u32::from(c != start));
        prop_assert_eq!(p.node().display_value(), c.name());
    }
}
