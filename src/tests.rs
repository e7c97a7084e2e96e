use crate::calculator::{ScoreCalculator, ScoreResult};
use crate::rule::RuleConfig;
use crate::types::{Conditions, Meld, Wind};

mod unit_tests {
    use super::*;

    fn conditions(bakaze: Wind, jikaze: Wind) -> Conditions {
        Conditions {
            bakaze,
            jikaze,
            ..Conditions::default()
        }
    }

    fn fired(result: &ScoreResult, name: &str) -> bool {
        result.yaku.iter().any(|(n, _)| n == name)
    }

    #[test]
    fn test_round_wind_triplet_ron() {
        // EEE 123m 456m 567p 55s, ron 3m as West seat in the East round
        let closed = vec![27, 27, 27, 0, 1, 2, 3, 4, 5, 13, 14, 15, 22, 22];
        let calc = ScoreCalculator::new(
            closed,
            Vec::new(),
            Some(2),
            Vec::new(),
            0,
            Some(conditions(Wind::East, Wind::West)),
            None,
        );
        let r = calc.calc();
        assert!(r.is_agari);
        assert_eq!(r.yaku, vec![("bakaze".to_string(), 1)]);
        assert_eq!((r.han, r.fu, r.ten), (1, 40, 1300));
        assert!(r
            .fu_reasons
            .contains(&("closed triplet non simple".to_string(), 8)));
        assert!(r.fu_reasons.contains(&("edge wait".to_string(), 2)));
    }

    #[test]
    fn test_seven_pairs_ron() {
        let closed = vec![0, 0, 2, 2, 4, 4, 9, 9, 11, 11, 20, 20, 33, 33];
        let calc = ScoreCalculator::new(closed, Vec::new(), Some(0), Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(fired(&r, "chiitoitsu"));
        assert_eq!((r.han, r.fu, r.ten), (2, 25, 1600));
    }

    #[test]
    fn test_kokushi_single_and_thirteen_sided() {
        let closed = vec![0, 0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];
        // winning on a tile held once: the ordinary limit hand
        let calc =
            ScoreCalculator::new(closed.clone(), Vec::new(), Some(8), Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(fired(&r, "kokushimusou"));
        assert_eq!((r.yakuman, r.fu, r.ten), (1, 0, 32000));

        // winning on the pair tile: thirteen-sided, doubled by default
        let calc =
            ScoreCalculator::new(closed.clone(), Vec::new(), Some(0), Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(fired(&r, "kokushimusou 13 sides"));
        assert_eq!((r.yakuman, r.ten), (2, 64000));
        assert_eq!(r.name, "double yakuman");

        let calc = ScoreCalculator::new(
            closed,
            Vec::new(),
            Some(0),
            Vec::new(),
            0,
            None,
            Some(RuleConfig::tenhou()),
        );
        let r = calc.calc();
        assert_eq!((r.yakuman, r.ten), (1, 32000));
    }

    #[test]
    fn test_pinfu_tsumo_and_ron() {
        // 123m 456m 234p 456s + 99p pair, ending on 6s
        let closed = vec![0, 1, 2, 3, 4, 5, 10, 11, 12, 17, 17, 21, 22, 23];
        let calc =
            ScoreCalculator::new(closed.clone(), Vec::new(), None, Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(fired(&r, "pinfu"));
        assert!(fired(&r, "menzen tsumo"));
        assert_eq!((r.han, r.fu), (2, 20));
        assert_eq!(r.ten_tsumo, vec![400, 700]);
        assert_eq!(r.ten, 1500);

        let calc = ScoreCalculator::new(closed, Vec::new(), Some(23), Vec::new(), 0, None, None);
        let r = calc.calc();
        assert_eq!((r.han, r.fu, r.ten), (1, 30, 1000));
    }

    #[test]
    fn test_open_hand_floors_at_thirty_fu() {
        // open all-simples with nothing but runs: raw fu stays at 20
        let closed = vec![1, 2, 3, 20, 21, 22, 13, 13];
        let melds = vec![
            Meld::new(vec![4, 5, 6], true),
            Meld::new(vec![14, 15, 16], true),
        ];
        let calc = ScoreCalculator::new(closed, melds, Some(20), Vec::new(), 0, None, None);
        let r = calc.calc();
        assert_eq!(r.yaku, vec![("tanyao".to_string(), 1)]);
        assert_eq!((r.han, r.fu, r.ten), (1, 30, 1000));
        assert!(r.fu_reasons.contains(&("open pinfu".to_string(), 2)));
    }

    #[test]
    fn test_dora_adds_han_not_fu() {
        let closed = vec![27, 27, 27, 0, 1, 2, 3, 4, 5, 13, 14, 15, 22, 22];
        let calc = ScoreCalculator::new(
            closed,
            Vec::new(),
            Some(2),
            vec![22],
            0,
            Some(conditions(Wind::East, Wind::West)),
            None,
        );
        let r = calc.calc();
        assert!(r.yaku.contains(&("dora".to_string(), 2)));
        assert_eq!((r.han, r.fu, r.ten), (3, 40, 5200));
    }

    #[test]
    fn test_akadora_respects_rule() {
        let closed = vec![1, 2, 3, 20, 21, 22, 13, 13];
        let melds = vec![
            Meld::new(vec![4, 5, 6], true),
            Meld::new(vec![14, 15, 16], true),
        ];
        let calc = ScoreCalculator::new(
            closed.clone(),
            melds.clone(),
            Some(20),
            Vec::new(),
            1,
            None,
            None,
        );
        let r = calc.calc();
        assert!(r.yaku.contains(&("akadora".to_string(), 1)));
        assert_eq!(r.han, 2);

        let mut rule = RuleConfig::default();
        rule.allow_aka = false;
        let calc =
            ScoreCalculator::new(closed, melds, Some(20), Vec::new(), 1, None, Some(rule));
        let r = calc.calc();
        assert!(!fired(&r, "akadora"));
        assert_eq!(r.han, 1);
    }

    #[test]
    fn test_disabling_the_only_yaku_leaves_no_score() {
        let closed = vec![1, 2, 3, 20, 21, 22, 13, 13];
        let melds = vec![
            Meld::new(vec![4, 5, 6], true),
            Meld::new(vec![14, 15, 16], true),
        ];
        let mut rule = RuleConfig::default();
        rule.disable_yaku("tanyao".to_string());
        let calc = ScoreCalculator::new(closed, melds, Some(20), Vec::new(), 0, None, Some(rule));
        let r = calc.calc();
        assert!(r.is_agari);
        assert_eq!(r.ten, 0);
        assert_eq!(r.text, "no yaku");
    }

    #[test]
    fn test_disabled_chiitoitsu_takes_general_fu_path() {
        // all-simple seven pairs by tsumo: with the rule off, the hand still
        // wins on tanyao and the fu come from the general count, not the
        // flat 25
        let closed = vec![1, 1, 3, 3, 5, 5, 10, 10, 12, 12, 14, 14, 20, 20];
        let mut rule = RuleConfig::default();
        rule.disable_yaku("chiitoitsu".to_string());
        let calc =
            ScoreCalculator::new(closed, Vec::new(), None, Vec::new(), 0, None, Some(rule));
        let r = calc.calc();
        assert!(fired(&r, "tanyao"));
        assert!(fired(&r, "menzen tsumo"));
        assert!(!fired(&r, "chiitoitsu"));
        // 20 base + 2 pair wait + 2 tsumo, rounded up
        assert_eq!((r.han, r.fu, r.ten), (2, 30, 2000));
    }

    #[test]
    fn test_best_decomposition_wins() {
        // 111222333m 44m 456s reads as three triplets or three runs; the
        // triplet reading carries sanankou and pays more
        let closed = vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 22, 23, 24];
        let calc = ScoreCalculator::new(closed, Vec::new(), None, Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(fired(&r, "sanankou"));
        assert_eq!((r.han, r.fu, r.ten), (3, 40, 5200));
    }

    #[test]
    fn test_calc_is_idempotent() {
        let closed = vec![0, 1, 2, 3, 4, 5, 10, 11, 12, 17, 17, 21, 22, 23];
        let calc = ScoreCalculator::new(closed, Vec::new(), None, Vec::new(), 0, None, None);
        assert_eq!(calc.calc(), calc.calc());
    }

    #[test]
    fn test_malformed_meld_is_dissolved() {
        // a declared group that is no proper set goes back to the closed pool
        let closed = vec![13, 13];
        let melds = vec![Meld::new(vec![0, 2, 4], true)];
        let calc = ScoreCalculator::new(closed, melds, None, Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(!r.error);
        assert!(!r.is_agari);
        assert!(r.hairi.is_some());
    }

    #[test]
    fn test_dissolved_meld_keeps_the_drawn_tile() {
        // self-draw on 6s; the bogus declared group goes back to the closed
        // pool and happens to complete the hand, but the appended tiles must
        // not be mistaken for the draw
        let closed = vec![0, 1, 2, 3, 4, 5, 17, 17, 9, 10, 23];
        let melds = vec![Meld::new(vec![11, 21, 22], true)];
        let calc = ScoreCalculator::new(closed, melds, None, Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(r.is_agari);
        // 6s finishes 456s two-sided: pinfu holds, which a 5s draw would not
        assert!(fired(&r, "pinfu"));
        assert!(fired(&r, "menzen tsumo"));
        assert_eq!((r.han, r.fu), (2, 20));
    }

    #[test]
    fn test_input_validation() {
        // 3k closed tiles can never hold a winning shape
        let calc = ScoreCalculator::new(
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Vec::new(),
            None,
            Vec::new(),
            0,
            None,
            None,
        );
        assert!(calc.calc().error);

        // too many tiles for the declared melds
        let calc = ScoreCalculator::new(
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 18],
            vec![Meld::new(vec![20, 20, 20], true)],
            None,
            Vec::new(),
            0,
            None,
            None,
        );
        assert!(calc.calc().error);

        // out-of-range tile id
        let calc =
            ScoreCalculator::new(vec![0, 99], Vec::new(), None, Vec::new(), 0, None, None);
        assert!(calc.calc().error);

        // ron tile must be part of the hand
        let calc = ScoreCalculator::new(
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 18],
            Vec::new(),
            Some(20),
            Vec::new(),
            0,
            None,
            None,
        );
        assert!(calc.calc().error);
    }

    #[test]
    fn test_tenpai_hand_reports_waits() {
        // 123m 456m 789m 123p + lone 1s: tenpai on the pair
        let closed = vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18];
        let calc = ScoreCalculator::new(closed, Vec::new(), None, Vec::new(), 0, None, None);
        let r = calc.calc();
        assert!(!r.is_agari);
        let h = r.hairi.unwrap();
        assert_eq!(h.now, 0);
        assert_eq!(h.wait, vec![18]);
    }

    #[test]
    fn test_riichi_flags_stack() {
        let closed = vec![0, 1, 2, 3, 4, 5, 10, 11, 12, 17, 17, 21, 22, 23];
        let flags = Conditions {
            riichi: true,
            ippatsu: true,
            ..Conditions::default()
        };
        let calc = ScoreCalculator::new(
            closed,
            Vec::new(),
            Some(23),
            Vec::new(),
            0,
            Some(flags),
            None,
        );
        let r = calc.calc();
        assert!(fired(&r, "riichi"));
        assert!(fired(&r, "ippatsu"));
        assert!(fired(&r, "pinfu"));
        assert_eq!(r.han, 3);
    }

    #[test]
    fn test_from_text_matches_explicit_input() {
        let calc = ScoreCalculator::from_text(
            "123m456m234p456s99p",
            Some(23),
            Vec::new(),
            None,
            None,
        )
        .unwrap();
        let r = calc.calc();
        assert!(fired(&r, "pinfu"));
        assert_eq!((r.han, r.fu, r.ten), (1, 30, 1000));
    }

    #[test]
    fn test_kiriage_mangan_rule() {
        // riichi + ippatsu + pinfu + one dora: 4 han 30 fu on a ron
        let closed = vec![0, 1, 2, 3, 4, 5, 10, 11, 12, 17, 17, 21, 22, 23];
        let flags = Conditions {
            riichi: true,
            ippatsu: true,
            ..Conditions::default()
        };
        let calc = ScoreCalculator::new(
            closed.clone(),
            Vec::new(),
            Some(23),
            Vec::new(),
            0,
            Some(flags.clone()),
            None,
        );
        let r = calc.calc();
        assert_eq!((r.han, r.fu), (3, 30));
        assert_eq!(r.ten, 3900);

        let calc = ScoreCalculator::new(
            closed,
            Vec::new(),
            Some(23),
            vec![0],
            0,
            Some(flags),
            Some(RuleConfig::mjsoul()),
        );
        let r = calc.calc();
        assert_eq!((r.han, r.fu), (4, 30));
        assert_eq!((r.ten, r.name.as_str()), (8000, "mangan"));
    }
}
