//! Outgoing alert content.
//!
//! Builds the two payloads every provider attempt delivers: the SMS body
//! and the TwiML speech document for the voice call. Both carry the same
//! location and risk-level content so a contact who misses one channel
//! still gets the full alert from the other.

use crate::model::AlertRequest;

/// SMS body: location, risk level, and the evacuation directive.
pub fn sms_body(request: &AlertRequest) -> String {
    format!(
        "CYCLONE EMERGENCY ALERT\n\
         Location: {}\n\
         Risk Level: {}\n\
         Action: Evacuate to the nearest shelter immediately.",
        request.location_label, request.risk
    )
}

/// TwiML `<Say>` document for the voice call, speaking the same
/// location/risk content as the SMS.
pub fn voice_twiml(request: &AlertRequest) -> String {
    format!(
        "<Response>\
           <Say voice=\"alice\" language=\"en-IN\">\
             Attention. This is an automated emergency alert for {}. \
             The cyclone risk is currently {}. \
             Please move to a safe zone or shelter immediately.\
           </Say>\
         </Response>",
        request.location_label, request.risk
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
