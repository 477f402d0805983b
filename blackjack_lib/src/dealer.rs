//! The dealer's fixed decision rule. The dealer draws below 17 and stands on any 17, soft or hard,
//! without ever looking at the player's hand.

use crate::hand::Hand;

pub const DEALER_STANDS_ON: u32 = 17;

pub fn should_draw(dealer_hand: &Hand) -> bool {
    dealer_hand.value() < DEALER_STANDS_ON
}
