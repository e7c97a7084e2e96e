use pyo3::prelude::*;

/// The point transfer for a win. `ten` is the winner's total take;
/// `ten_tsumo` is the per-payer split for self-draw wins: `[each]` for a
/// dealer, `[non_dealer, dealer]` otherwise.
#[pyclass]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Points {
    #[pyo3(get)]
    pub ten: u32,
    #[pyo3(get)]
    pub ten_tsumo: Vec<u32>,
    /// Limit-hand name ("mangan", "haneman", ...), empty below the limits.
    #[pyo3(get)]
    pub name: String,
}

fn ceil100(n: u32) -> u32 {
    n.div_ceil(100) * 100
}

fn base_points(han: u32, fu: u32, yakuman: u8, with_kiriage: bool) -> (u32, String) {
    if yakuman > 0 {
        let name = match yakuman {
            1 => "yakuman".to_string(),
            2 => "double yakuman".to_string(),
            n => format!("{n}x yakuman"),
        };
        return (8000 * yakuman as u32, name);
    }
    if han == 0 {
        return (0, String::new());
    }
    if han >= 13 {
        return (8000, "kazoe yakuman".to_string());
    }
    if han >= 11 {
        return (6000, "sanbaiman".to_string());
    }
    if han >= 8 {
        return (4000, "baiman".to_string());
    }
    if han >= 6 {
        return (3000, "haneman".to_string());
    }
    let base = fu << (han + 2);
    if base > 2000 {
        return (2000, "mangan".to_string());
    }
    if with_kiriage && ((han == 4 && fu == 30) || (han == 3 && fu == 60)) {
        return (2000, "mangan".to_string());
    }
    (base, String::new())
}

/// Payments are rounded up to 100 per payer, so a non-dealer tsumo can total
/// slightly more than the equivalent ron.
pub fn calc_points(
    han: u32,
    fu: u32,
    yakuman: u8,
    is_dealer: bool,
    is_tsumo: bool,
    with_kiriage: bool,
) -> Points {
    let (base, name) = base_points(han, fu, yakuman, with_kiriage);
    if base == 0 {
        return Points::default();
    }
    let (ten, ten_tsumo) = if is_tsumo {
        if is_dealer {
            let each = ceil100(2 * base);
            (3 * each, vec![each])
        } else {
            let child = ceil100(base);
            let parent = ceil100(2 * base);
            (2 * child + parent, vec![child, parent])
        }
    } else {
        let ten = ceil100(if is_dealer { 6 * base } else { 4 * base });
        (ten, Vec::new())
    };
    Points {
        ten,
        ten_tsumo,
        name,
    }
}

/// Point transfer for a given han/fu count, without evaluating a hand.
#[pyfunction]
#[pyo3(signature = (han, fu, yakuman=0, is_dealer=false, is_tsumo=false, with_kiriage=false))]
pub fn calculate_points(
    han: u32,
    fu: u32,
    yakuman: u8,
    is_dealer: bool,
    is_tsumo: bool,
    with_kiriage: bool,
) -> Points {
    calc_points(han, fu, yakuman, is_dealer, is_tsumo, with_kiriage)
}
