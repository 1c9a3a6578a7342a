use thiserror::Error;

/// Failure while writing a raw column value into a slot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotError {
    #[error("NULL value for non-nullable {target}")]
    UnexpectedNull { target: &'static str },

    #[error("cannot parse {value:?} as {target}")]
    Parse {
        value: String,
        target: &'static str,
    },
}

/// A writable destination for one mapped field.
///
/// Drivers hand values over as text; `None` stands for SQL NULL.
pub trait Slot {
    fn scan(&mut self, raw: Option<&str>) -> Result<(), SlotError>;
}

fn require<'a>(raw: Option<&'a str>, target: &'static str) -> Result<&'a str, SlotError> {
    raw.ok_or(SlotError::UnexpectedNull { target })
}

macro_rules! impl_slot_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn scan(&mut self, raw: Option<&str>) -> Result<(), SlotError> {
                    let target = stringify!($ty);
                    let text = require(raw, target)?;
                    *self = text.trim().parse().map_err(|_| SlotError::Parse {
                        value: text.to_string(),
                        target,
                    })?;
                    Ok(())
                }
            }
        )*
    };
}

impl_slot_from_str!(i16, i32, i64, f32, f64);

impl Slot for String {
    fn scan(&mut self, raw: Option<&str>) -> Result<(), SlotError> {
        let text = require(raw, "String")?;
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl Slot for bool {
    fn scan(&mut self, raw: Option<&str>) -> Result<(), SlotError> {
        let text = require(raw, "bool")?;
        *self = match text {
            "true" | "t" => true,
            "false" | "f" => false,
            other => {
                return Err(SlotError::Parse {
                    value: other.to_string(),
                    target: "bool",
                })
            }
        };
        Ok(())
    }
}

impl<T: Slot + Default> Slot for Option<T> {
    fn scan(&mut self, raw: Option<&str>) -> Result<(), SlotError> {
        match raw {
            None => *self = None,
            Some(text) => {
                let mut value = T::default();
                value.scan(Some(text))?;
                *self = Some(value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_integers_and_text() {
        let mut id = 0i32;
        id.scan(Some("42")).unwrap();
        assert_eq!(id, 42);

        let mut big = 0i64;
        big.scan(Some(" 9000000000 ")).unwrap();
        assert_eq!(big, 9_000_000_000);

        let mut name = String::from("stale");
        name.scan(Some("john appleseed")).unwrap();
        assert_eq!(name, "john appleseed");
    }

    #[test]
    fn test_scan_bool_accepts_postgres_text() {
        let mut flag = false;
        flag.scan(Some("t")).unwrap();
        assert!(flag);
        flag.scan(Some("false")).unwrap();
        assert!(!flag);
        assert!(flag.scan(Some("yes")).is_err());
    }

    #[test]
    fn test_scan_null() {
        let mut title: Option<String> = Some("old".to_string());
        title.scan(None).unwrap();
        assert_eq!(title, None);

        title.scan(Some("the meaning of life")).unwrap();
        assert_eq!(title.as_deref(), Some("the meaning of life"));

        let mut id = 7i32;
        assert_eq!(
            id.scan(None),
            Err(SlotError::UnexpectedNull { target: "i32" })
        );
        assert_eq!(id, 7);
    }

    #[test]
    fn test_scan_parse_error() {
        let mut id = 0i64;
        let err = id.scan(Some("abc")).unwrap_err();
        assert_eq!(
            err,
            SlotError::Parse {
                value: "abc".to_string(),
                target: "i64"
            }
        );
    }
}
