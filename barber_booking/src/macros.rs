/// Создаёт новый строковый доменный тип с валидацией.
///
/// Значение проверяется при создании и при десериализации, поэтому
/// невалидная строка от сервера превращается в ошибку разбора ответа.
#[macro_export]
macro_rules! newtype {
    ($tname:ident, $validate_fn:ident) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            serde::Serialize,
            serde::Deserialize,
            std::cmp::PartialEq,
            std::cmp::Eq,
            std::hash::Hash,
        )]
        #[serde(try_from = "String")]
        pub struct $tname(String);

        impl $tname {
            pub fn new(value: &str) -> anyhow::Result<Self> {
                $validate_fn(value)?;
                Ok(Self(value.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $tname {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::convert::AsRef<str> for $tname {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::cmp::PartialEq<&str> for $tname {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        #[allow(clippy::from_over_into)]
        impl std::convert::Into<String> for $tname {
            fn into(self) -> String {
                self.0
            }
        }

        impl std::convert::TryFrom<String> for $tname {
            type Error = anyhow::Error;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                $validate_fn(&value)?;
                Ok(Self(value))
            }
        }

        impl std::str::FromStr for $tname {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $tname::new(s)
            }
        }
    };
}
