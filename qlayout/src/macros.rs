/// Builds an [`OptionBag`](crate::options::OptionBag) from `key => value` pairs.
///
/// Values are converted with [`Into`]; keys keep their listed order.
#[macro_export]
macro_rules! bag {
    () => (
        $crate::options::OptionBag::new()
    );
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut bag = $crate::options::OptionBag::new();
        $(
            bag.insert($key, $value);
        )+
        bag
    }};
}
