use crate::{
    Color, GameOptions, Komi, Rules, LAST_HUMAN_LETTER, MAX_HANDICAP, MAX_KOMI_POINTS, MAX_LEVEL,
    MIN_LEVEL, VALID_BOARD_SIZES,
};

/// A column letter as a person would say it, `A` to `Y`.
#[derive(Clone, Copy, Debug)]
pub struct HumanLetter(pub char);

impl quickcheck::Arbitrary for HumanLetter {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let letters: Vec<char> = ('A'..=LAST_HUMAN_LETTER).collect();
        HumanLetter(*g.choose(&letters).unwrap())
    }
}

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Color::Black, Color::White]).unwrap()
    }
}

impl quickcheck::Arbitrary for Rules {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Rules::Chinese, Rules::Japanese]).unwrap()
    }
}

impl quickcheck::Arbitrary for Komi {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Komi::from_whole_points(u8::arbitrary(g) % (MAX_KOMI_POINTS + 1)).unwrap()
    }
}

impl quickcheck::Arbitrary for GameOptions {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let levels: Vec<u8> = (MIN_LEVEL..=MAX_LEVEL).collect();
        GameOptions {
            board_size: *g.choose(&VALID_BOARD_SIZES).unwrap(),
            color: Color::arbitrary(g),
            handicap: u8::arbitrary(g) % (MAX_HANDICAP + 1),
            komi: Komi::arbitrary(g),
            level: *g.choose(&levels).unwrap(),
            rules: Rules::arbitrary(g),
        }
    }
}
