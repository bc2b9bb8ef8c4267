use approx::assert_abs_diff_eq;
use expression_statistics::data::GeneTable;
use expression_statistics::error::StatsError;
use expression_statistics::stats::{
    Analyzer, SelectionStrategy, describe, filter_above_threshold, rank_top_n, score_one,
};

#[cfg(test)]
mod quick_test {
    use super::*;

    fn example_table() -> GeneTable {
        // GeneA: [2, 4, 6] -> mean 4, population variance 8/3
        // GeneB: [10, 10, 10] -> constant, no spread
        GeneTable::from_genes(vec![
            ("GeneA", vec![2.0, 4.0, 6.0]),
            ("GeneB", vec![10.0, 10.0, 10.0]),
        ])
        .unwrap()
    }

    #[test]
    fn check_descriptive_example() {
        let table = example_table();

        let a = describe(&table, "GeneA").unwrap();
        println!("=== GeneA === {:?}", a);
        assert_abs_diff_eq!(a.mean, 4.0);
        assert_abs_diff_eq!(a.variance, 2.666_666_7, epsilon = 1e-6);
        assert_abs_diff_eq!(a.std_dev, 1.632_993, epsilon = 1e-6);
        assert_eq!(a.min, 2.0);
        assert_eq!(a.max, 6.0);

        let b = describe(&table, "GeneB").unwrap();
        assert_abs_diff_eq!(b.mean, 10.0);
        assert_eq!(b.variance, 0.0);
        assert_eq!(b.std_dev, 0.0);
    }

    #[test]
    fn check_std_dev_squared_is_variance() {
        let table = GeneTable::from_genes(vec![
            ("Noisy", vec![0.13, 7.9, 3.3, 12.0, -4.5, 8.25]),
            ("Tiny", vec![1e-6, 2e-6, 3e-6]),
        ])
        .unwrap();

        for gene in ["Noisy", "Tiny"] {
            let stats = describe(&table, gene).unwrap();
            assert_abs_diff_eq!(stats.std_dev * stats.std_dev, stats.variance, epsilon = 1e-12);
        }
    }

    #[test]
    fn check_unknown_gene() {
        let result = describe(&example_table(), "GeneX");
        assert_eq!(
            result,
            Err(StatsError::UnknownGene {
                gene: "GeneX".to_string()
            })
        );
    }

    #[test]
    fn check_top_one() {
        let top = rank_top_n(&example_table(), &["GeneA", "GeneB"], 1).unwrap();
        println!("=== TOP 1 === {:?}", top);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].gene, "GeneA");
        assert_eq!(top[0].rank, 1);
        assert_abs_diff_eq!(top[0].score, 1.632_993, epsilon = 1e-6);
    }

    #[test]
    fn check_score_one_agrees_with_ranking() {
        let table = example_table();
        let single = score_one(&table, "GeneB").unwrap();
        let ranked = rank_top_n(&table, &["GeneA", "GeneB"], 2).unwrap();
        assert_eq!(single.score, ranked[1].score);
        assert_eq!(single.rank, 1);
    }

    #[test]
    fn check_invalid_top_n() {
        assert_eq!(
            rank_top_n(&example_table(), &["GeneA"], 0),
            Err(StatsError::InvalidTopN { requested: 0 })
        );
    }

    #[test]
    fn check_threshold_example() {
        let results = filter_above_threshold(&example_table(), &["GeneA", "GeneB"], 5.0).unwrap();
        println!("=== THRESHOLD 5.0 === {:?}", results);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].gene, "GeneA");
        assert_eq!(results[0].value, 4.0);
        assert!(!results[0].exceeds);
        assert_eq!(results[1].gene, "GeneB");
        assert_eq!(results[1].value, 10.0);
        assert!(results[1].exceeds);
    }

    #[test]
    fn check_heap_and_sort_agree_on_large_pool() {
        // 500 genes, scores with many exact ties
        let genes: Vec<(String, Vec<f64>)> = (0..500)
            .map(|i| {
                let spread = ((i * 13) % 17) as f64;
                (format!("gene_{i}"), vec![-spread, spread, 0.0, 1.0])
            })
            .collect();
        let table = GeneTable::from_genes(genes).unwrap();
        let names = table.gene_names();

        for n in [1, 2, 17, 64, 65, 128, 499, 500, 1000] {
            let heap = Analyzer::default()
                .with_strategy(SelectionStrategy::Heap)
                .rank_top_n(&table, names, n)
                .unwrap();
            let sort = Analyzer::default()
                .with_strategy(SelectionStrategy::FullSort)
                .rank_top_n(&table, names, n)
                .unwrap();
            let auto = Analyzer::default().rank_top_n(&table, names, n).unwrap();
            assert_eq!(heap, sort, "heap and sort disagree for n = {n}");
            assert_eq!(auto, sort, "auto and sort disagree for n = {n}");
        }
    }

    #[test]
    fn check_calls_are_idempotent() {
        let table = example_table();
        let genes = ["GeneB", "GeneA"];

        assert_eq!(describe(&table, "GeneA"), describe(&table, "GeneA"));
        assert_eq!(rank_top_n(&table, &genes, 2), rank_top_n(&table, &genes, 2));
        assert_eq!(
            filter_above_threshold(&table, &genes, 3.0),
            filter_above_threshold(&table, &genes, 3.0)
        );
    }
}
