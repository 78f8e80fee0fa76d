use crate::interpreter::value::core::{Value, boolean_and, from_bool};

/// Generates a relational operator folding with boolean AND.
///
/// The left operand drives the result size; every element of it must compare
/// true against all elements of the right operand.
macro_rules! relational {
    ($($fname:ident => $op:tt, $doc:literal);* $(;)?) => {
        $(
            #[doc = $doc]
            #[must_use]
            pub fn $fname(a: &Value, b: &Value) -> Value {
                a.transform(b, boolean_and, |x, y| from_bool(x $op y))
            }
        )*
    };
}

relational! {
    equal            => ==, "`1` where `a[i] == b[j]` for every `j`.";
    greater          => >,  "`1` where `a[i] > b[j]` for every `j`.";
    less             => <,  "`1` where `a[i] < b[j]` for every `j`.";
    greater_or_equal => >=, "`1` where `a[i] >= b[j]` for every `j`.";
    less_or_equal    => <=, "`1` where `a[i] <= b[j]` for every `j`.";
}
