//! 请求代次 (Request generations)
//!
//! 同一数据槽位（如"月可用性"、"当日预约"）每发起一次请求就递增代次，
//! 响应返回时只接受最新代次，较早发出但较晚返回的响应被丢弃。

/// 单次请求的代次标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// 一个数据槽位的请求代次计数器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSlot {
    latest: u64,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新请求，之前发出的所有代次随即过期
    pub fn begin(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// 响应是否来自最新一次请求
    pub fn accepts(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

/// 带有请求参数的响应数据
///
/// 选中的日期或月份变化后，旧参数下的数据不再可见。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyed<K, T> {
    pub key: K,
    pub value: T,
}

impl<K: PartialEq, T> Keyed<K, T> {
    pub fn new(key: K, value: T) -> Self {
        Self { key, value }
    }

    /// 仅当参数一致时返回数据
    pub fn get(&self, key: &K) -> Option<&T> {
        (self.key == *key).then_some(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_generation_is_accepted() {
        let mut slot = FetchSlot::new();
        let g = slot.begin();
        assert!(slot.accepts(g));
    }

    #[test]
    fn stale_response_is_discarded_after_newer_request() {
        let mut slot = FetchSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        // second resolves first, then the stale first arrives
        assert!(slot.accepts(second));
        assert!(!slot.accepts(first));
        assert!(first < second);
    }

    #[test]
    fn keyed_value_is_hidden_for_other_keys() {
        let loaded = Keyed::new(3_u32, vec!["a"]);
        assert_eq!(loaded.get(&3), Some(&vec!["a"]));
        assert_eq!(loaded.get(&4), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut availability = FetchSlot::new();
        let mut appointments = FetchSlot::new();
        let a = availability.begin();
        appointments.begin();
        appointments.begin();
        assert!(availability.accepts(a));
    }
}
