use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Array, Object, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Number(JsonNumber::arbitrary(g).0),
                3 => Value::String(String::arbitrary(g).into()),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    let mut array = Array::new();
                    for _ in 0..len {
                        array.push(gen_val(g, depth - 1));
                    }
                    Value::Array(array)
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut object = Object::new();
                    for _ in 0..len {
                        // Duplicate keys are kept, so any key sequence is valid.
                        object.push(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(object)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }
}
