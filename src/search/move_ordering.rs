use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::move_description::Move;
use crate::search::board_scoring::piece_value;

/// Higher sorts earlier. Captures rank by victim value, then by the cheapest
/// attacker; promotions follow captures; quiet moves keep generation order.
pub fn move_order_key(mv: &Move) -> i32 {
    let mut key = 0;
    if let Some(victim) = mv.captured {
        key += 10_000 + 10 * piece_value(victim) - piece_value(mv.piece).min(1000);
    }
    if let Some(promotion) = mv.promotion() {
        key += 5_000 + piece_value(promotion);
    }
    key
}

/// Stable sort, so equal keys keep the generator's order.
pub fn order_moves(moves: &mut [GeneratedMove]) {
    moves.sort_by_key(|generated| std::cmp::Reverse(move_order_key(&generated.mv)));
}
