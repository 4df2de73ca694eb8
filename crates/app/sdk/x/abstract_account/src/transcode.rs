use crate::msg::EncodedMsg;
use evolve_core::SdkResult;
use evolve_stf_traits::TxMsg;

/// Encodes every message as `(type_url, canonical bytes)`, preserving order.
///
/// Fails on the first message that cannot be encoded; no partial list is returned.
pub fn transcode_msgs(msgs: &[Box<dyn TxMsg>]) -> SdkResult<Vec<EncodedMsg>> {
    msgs.iter()
        .map(|msg| msg.to_any().map(EncodedMsg::from))
        .collect()
}
