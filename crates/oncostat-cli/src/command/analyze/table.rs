//! Text tables of the analysis report

use std::collections::BTreeMap;

use oncostat_analysis::{
    InterpretationResult,
    association::AssociationResult,
    comparison::{FeatureAnova, FeatureComparison},
    correlation::CorrelationMatrix,
    dataset::Feature,
    descriptive::{DescriptiveSummary, SummaryTable},
    interpretation::EffectSizeCategory,
    snapshot::SampleSizes,
};

fn print_section(title: &str) {
    println!("{title}");
    println!("{}", "-".repeat(title.chars().count()));
}

fn opt_str(value: Option<f64>, precision: usize) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.precision$}"))
}

pub(super) fn print_sample_sizes(sizes: &SampleSizes) {
    print_section("Sample Sizes");
    println!("  Total:     {:>6}", sizes.total);
    println!("  Benign:    {:>6}", sizes.benign);
    println!("  Malignant: {:>6}", sizes.malignant);
}

fn print_summary_table(title: &str, table: &SummaryTable) {
    println!("  {title}");
    println!(
        "  {:<14} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Feature", "Count", "Mean", "Std", "Min", "Q1", "Median", "Q3", "Max",
    );
    // feature(14) + count(6) + 7 * value(10) + spaces(8)
    println!("  {}", "-".repeat(98));
    for (feature, stats) in table {
        match stats {
            Some(stats) => println!(
                "  {:<14} {:>6} {:>10.4} {:>10} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                feature.name(),
                stats.count,
                stats.mean,
                opt_str(stats.std_dev, 4),
                stats.min,
                stats.q1,
                stats.median,
                stats.q3,
                stats.max,
            ),
            None => println!("  {:<14} {:>6}", feature.name(), 0),
        }
    }
}

pub(super) fn print_descriptive(summary: &DescriptiveSummary) {
    print_section("Descriptive Statistics");
    print_summary_table("Overall", &summary.overall);
    println!();
    print_summary_table("Benign", &summary.benign);
    println!();
    print_summary_table("Malignant", &summary.malignant);
    println!();

    println!("  Shape (overall)");
    println!("  {:<14} {:>10} {:>10}", "Feature", "Skewness", "Kurtosis");
    println!("  {}", "-".repeat(36));
    for (feature, shape) in &summary.shape {
        println!(
            "  {:<14} {:>10} {:>10}",
            feature.name(),
            opt_str(shape.skewness, 4),
            opt_str(shape.kurtosis, 4),
        );
    }
    println!();
}

pub(super) fn print_comparisons(comparisons: &BTreeMap<Feature, FeatureComparison>, alpha: f64) {
    print_section("Independent t-tests (Benign vs Malignant)");
    println!(
        "  {:<14} {:>10} {:>10} {:>9} {:>5} {:>10} {:>9} {:>7} {:>10} {:>4}",
        "Feature", "Benign", "Malignant", "t", "df", "p", "d", "Effect", "Welch p", "Sig",
    );
    // feature(14) + values(10+10+9+5+10+9+7+10+4) + spaces(9)
    println!("  {}", "-".repeat(97));
    for (feature, c) in comparisons {
        println!(
            "  {:<14} {:>10.4} {:>10.4} {:>9.3} {:>5} {:>10.4} {:>9.3} {:>7} {:>10.4} {:>4}",
            feature.name(),
            c.benign.mean,
            c.malignant.mean,
            c.t_statistic,
            c.df,
            c.p_value,
            c.cohens_d,
            EffectSizeCategory::from_cohens_d(c.cohens_d).to_string(),
            c.welch.p_value,
            if c.significant { "*" } else { "" },
        );
    }
    println!("  * p < {alpha}");
}

pub(super) fn print_anova(anova: &BTreeMap<Feature, FeatureAnova>) {
    print_section("One-way ANOVA");
    println!(
        "  {:<14} {:>10} {:>9} {:>10} {:>8} {:>4}",
        "Feature", "F", "df", "p", "eta^2", "Sig",
    );
    println!("  {}", "-".repeat(60));
    for (feature, a) in anova {
        println!(
            "  {:<14} {:>10.3} {:>9} {:>10.4} {:>8.4} {:>4}",
            feature.name(),
            a.f_statistic,
            format!("{}/{}", a.df_between, a.df_within),
            a.p_value,
            a.eta_squared,
            if a.significant { "*" } else { "" },
        );
    }
}

pub(super) fn print_association(result: &AssociationResult) {
    print_section("Age Group x Diagnosis (chi-square test)");
    println!(
        "  {:<12} {:>8} {:>10} {:>13} {:>13}",
        "Age Group", "Benign", "Malignant", "Exp. Benign", "Exp. Malig."
    );
    println!("  {}", "-".repeat(60));
    for (observed, expected) in result.contingency.iter().zip(&result.expected) {
        println!(
            "  {:<12} {:>8} {:>10} {:>13.2} {:>13.2}",
            observed.age_group.to_string(),
            observed.benign,
            observed.malignant,
            expected.benign,
            expected.malignant,
        );
    }
    println!();
    println!("  Chi-square:   {:.4}", result.chi_square);
    println!("  dof:          {}", result.dof);
    println!("  p-value:      {:.4}", result.p_value);
    println!("  Cramer's V:   {:.4}", result.cramers_v);
    println!(
        "  Significant:  {}",
        if result.significant { "yes" } else { "no" }
    );
    if result.yates_corrected {
        println!("  (Yates' continuity correction applied)");
    }
    if result.excluded_rows > 0 {
        println!(
            "  ({} rows without a valid age excluded)",
            result.excluded_rows
        );
    }
}

pub(super) fn print_correlations(matrix: &CorrelationMatrix) {
    print_section("Pearson Correlations");
    print!("  {:<14}", "");
    for feature in &matrix.features {
        print!(" {:>12}", feature.name());
    }
    println!();
    for (feature, row) in matrix.features.iter().zip(&matrix.values) {
        print!("  {:<14}", feature.name());
        for value in row {
            print!(" {:>12}", opt_str(*value, 3));
        }
        println!();
    }
}

pub(super) fn print_interpretation(interpretation: &InterpretationResult) {
    print_section("Interpretation");
    let lists = [
        ("Significant differences", &interpretation.significant_differences),
        ("Effect sizes", &interpretation.effect_sizes),
        ("Recommendations", &interpretation.recommendations),
    ];
    for (title, items) in lists {
        println!("  {title}:");
        if items.is_empty() {
            println!("    (none)");
        }
        for item in items {
            println!("    - {item}");
        }
    }
}
