//! Static variant tables for the secondary archive, one label list per
//! (paper, doc type). Lists reflect the sessions actually published.

pub(crate) struct PaperSet {
    pub paper: &'static str,
    pub qp: &'static [&'static str],
    pub ms: &'static [&'static str],
}

pub(crate) const PAPER_SETS: &[PaperSet] = &[
    PaperSet {
        paper: "Paper-2",
        qp: &[
            "June 2010 (v1)", "June 2010 (v2)", "June 2010 (v3)", "June 2011 (v1)",
            "June 2011 (v2)", "June 2012 (v1)", "June 2012 (v2)", "June 2012 (v3)",
            "June 2013 (v1)", "June 2013 (v3)", "June 2014 (v1)", "June 2014 (v2)",
            "June 2014 (v3)", "June 2015 (v1)", "June 2016 (v1)", "June 2016 (v2)",
            "June 2016 (v3)", "June 2017 (v1)", "June 2017 (v2)", "June 2017 (v3)",
            "June 2018 (v1)", "June 2018 (v2)", "June 2018 (v3)", "June 2019 (v1)",
            "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)", "June 2020 (v3)",
            "June 2021 (v1)", "June 2021 (v2)", "June 2021 (v3)", "June 2022 (v1)",
            "June 2022 (v2)", "June 2022 (v3)", "June 2023 (v1)", "June 2023 (v2)",
            "June 2023 (v3)", "June 2024 (v1)", "June 2024 (v2)", "June 2024 (v3)",
            "March 2015 (v2)", "March 2016 (v2)", "March 2017 (v2)", "March 2018 (v2)",
            "March 2019 (v2)", "March 2020 (v2)", "March 2021 (v2)", "March 2022 (v2)",
            "March 2023 (v2)", "March 2024 (v2)", "November 2010 (v1)", "November 2010 (v2)",
            "November 2010 (v3)", "November 2011 (v1)", "November 2011 (v2)",
            "November 2011 (v3)", "November 2012 (v1)", "November 2012 (v2)",
            "November 2012 (v3)", "November 2013 (v1)", "November 2013 (v2)",
            "November 2013 (v3)", "November 2014 (v1)", "November 2014 (v2)",
            "November 2014 (v3)", "November 2015 (v1)", "November 2015 (v2)",
            "November 2015 (v3)", "November 2016 (v1)", "November 2016 (v2)",
            "November 2016 (v3)", "November 2017 (v1)", "November 2017 (v2)",
            "November 2017 (v3)", "November 2018 (v1)", "November 2018 (v2)",
            "November 2018 (v3)", "November 2019 (v1)", "November 2019 (v2)",
            "November 2019 (v3)", "November 2020 (v1)", "November 2020 (v2)",
            "November 2020 (v3)", "November 2021 (v1)", "November 2021 (v2)",
            "November 2021 (v3)", "November 2022 (v1)", "November 2022 (v2)",
            "November 2022 (v3)", "November 2023 (v1)", "November 2023 (v2)",
            "November 2023 (v3)", "November 2024 (v1)", "November 2024 (v2)",
            "November 2024 (v3)", "Specimen 2016", "Specimen 2020", "Specimen 2023",
        ],
        ms: &[
            "June 2010 (v1)", "June 2010 (v2)", "June 2011 (v1)", "June 2011 (v2)",
            "June 2012 (v1)", "June 2012 (v2)", "June 2012 (v3)", "June 2013 (v1)",
            "June 2013 (v2)", "June 2013 (v3)", "June 2014 (v1)", "June 2014 (v2)",
            "June 2014 (v3)", "June 2015 (v1)", "June 2016 (v1)", "June 2016 (v2)",
            "June 2016 (v3)", "June 2017 (v1)", "June 2017 (v2)", "June 2017 (v3)",
            "June 2018 (v1)", "June 2018 (v2)", "June 2018 (v3)", "June 2019 (v1)",
            "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)", "June 2021 (v1)",
            "June 2021 (v2)", "June 2021 (v3)", "June 2022 (v1)", "June 2022 (v2)",
            "June 2022 (v3)", "June 2023 (v1)", "June 2023 (v2)", "June 2023 (v3)",
            "June 2024 (v1)", "June 2024 (v2)", "June 2024 (v3)", "March 2015 (v2)",
            "March 2016 (v2)", "March 2017 (v2)", "March 2018 (v2)", "March 2019 (v2)",
            "March 2020 (v2)", "March 2021 (v2)", "March 2022 (v2)", "March 2023 (v2)",
            "March 2024 (v2)", "November 2010 (v1)", "November 2010 (v2)",
            "November 2010 (v3)", "November 2011 (v1)", "November 2011 (v2)",
            "November 2011 (v3)", "November 2012 (v1)", "November 2012 (v2)",
            "November 2012 (v3)", "November 2013 (v1)", "November 2013 (v2)",
            "November 2013 (v3)", "November 2014 (v1)", "November 2014 (v2)",
            "November 2014 (v3)", "November 2015 (v1)", "November 2015 (v2)",
            "November 2015 (v3)", "November 2016 (v1)", "November 2016 (v2)",
            "November 2016 (v3)", "November 2017 (v1)", "November 2017 (v2)",
            "November 2017 (v3)", "November 2018 (v1)", "November 2018 (v2)",
            "November 2018 (v3)", "November 2019 (v1)", "November 2019 (v2)",
            "November 2019 (v3)", "November 2020 (v1)", "November 2020 (v2)",
            "November 2020 (v3)", "November 2021 (v1)", "November 2021 (v2)",
            "November 2021 (v3)", "November 2022 (v1)", "November 2022 (v2)",
            "November 2022 (v3)", "November 2023 (v1)", "November 2023 (v2)",
            "November 2023 (v3)", "November 2024 (v1)", "November 2024 (v2)",
            "November 2024 (v3)", "Specimen 2016", "Specimen 2020", "Specimen 2023",
        ],
    },
    PaperSet {
        paper: "Paper-4",
        qp: &[
            "June 2016 (v1)", "June 2016 (v2)", "June 2017 (v1)", "June 2017 (v2)",
            "June 2017 (v3)", "June 2018 (v1)", "June 2018 (v3)", "June 2019 (v1)",
            "June 2019 (v2)", "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)",
            "June 2020 (v3)", "June 2021 (v1)", "June 2021 (v2)", "June 2021 (v3)",
            "June 2022 (v1)", "June 2022 (v2)", "June 2022 (v3)", "June 2023 (v1)",
            "June 2023 (v2)", "June 2023 (v3)", "June 2024 (v1)", "June 2024 (v2)",
            "June 2024 (v3)", "March 2016 (v2)", "March 2017 (v2)", "March 2018 (v2)",
            "March 2019 (v2)", "March 2020 (v2)", "March 2021 (v2)", "March 2022 (v2)",
            "March 2023 (v2)", "March 2024 (v2)", "November 2016 (v1)", "November 2016 (v2)",
            "November 2016 (v3)", "November 2017 (v1)", "November 2017 (v2)",
            "November 2017 (v3)", "November 2018 (v1)", "November 2018 (v2)",
            "November 2018 (v3)", "November 2019 (v1)", "November 2019 (v2)",
            "November 2019 (v3)", "November 2020 (v1)", "November 2020 (v2)",
            "November 2020 (v3)", "November 2021 (v1)", "November 2021 (v2)",
            "November 2021 (v3)", "November 2022 (v1)", "November 2022 (v2)",
            "November 2022 (v3)", "November 2023 (v1)", "November 2023 (v2)",
            "November 2023 (v3)", "November 2024 (v1)", "November 2024 (v2)",
            "November 2024 (v3)", "Specimen 2016", "Specimen 2020", "Specimen 2023",
        ],
        ms: &[
            "June 2016 (v1)", "June 2016 (v2)", "June 2017 (v1)", "June 2017 (v2)",
            "June 2017 (v3)", "June 2018 (v1)", "June 2018 (v3)", "June 2019 (v1)",
            "June 2019 (v2)", "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)",
            "June 2020 (v3)", "June 2021 (v1)", "June 2021 (v2)", "June 2021 (v3)",
            "June 2022 (v1)", "June 2022 (v2)", "June 2022 (v3)", "June 2023 (v1)",
            "June 2023 (v2)", "June 2023 (v3)", "June 2024 (v1)", "June 2024 (v2)",
            "June 2024 (v3)", "March 2016 (v2)", "March 2017 (v2)", "March 2018 (v2)",
            "March 2019 (v2)", "March 2020 (v2)", "March 2021 (v2)", "March 2022 (v2)",
            "March 2023 (v2)", "March 2024 (v2)", "November 2016 (v1)", "November 2016 (v2)",
            "November 2016 (v3)", "November 2017 (v1)", "November 2017 (v2)",
            "November 2017 (v3)", "November 2018 (v1)", "November 2018 (v2)",
            "November 2018 (v3)", "November 2019 (v1)", "November 2019 (v2)",
            "November 2019 (v3)", "November 2020 (v1)", "November 2020 (v2)",
            "November 2020 (v3)", "November 2021 (v1)", "November 2021 (v2)",
            "November 2021 (v3)", "November 2022 (v1)", "November 2022 (v2)",
            "November 2022 (v3)", "November 2023 (v1)", "November 2023 (v2)",
            "November 2023 (v3)", "November 2024 (v1)", "November 2024 (v2)",
            "November 2024 (v3)", "Specimen 2016", "Specimen 2020", "Specimen 2023",
        ],
    },
    PaperSet {
        paper: "Paper-6",
        qp: &[
            "June 2010 (v1)", "June 2010 (v2)", "June 2010 (v3)", "June 2011 (v1)",
            "June 2011 (v2)", "June 2011 (v3)", "June 2012 (v1)", "June 2012 (v2)",
            "June 2012 (v3)", "June 2013 (v1)", "June 2013 (v2)", "June 2013 (v3)",
            "June 2014 (v1)", "June 2014 (v2)", "June 2014 (v3)", "June 2015 (v1)",
            "June 2016 (v1)", "June 2016 (v2)", "June 2016 (v3)", "June 2017 (v1)",
            "June 2017 (v2)", "June 2017 (v3)", "June 2018", "June 2019 (v1)",
            "June 2019 (v2)", "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)",
            "June 2020 (v3)", "June 2021 (v1)", "June 2021 (v2)", "June 2021 (v3)",
            "June 2022 (v1)", "June 2022 (v2)", "June 2022 (v3)", "June 2023 (v1)",
            "June 2023 (v2)", "June 2023 (v3)", "June 2024 (v1)", "June 2024 (v2)",
            "June 2024 (v3)", "March 2015 (v2)", "March 2016 (v2)", "March 2017 (v2)",
            "March 2018 (v2)", "March 2019 (v2)", "March 2020 (v2)", "March 2021 (v2)",
            "March 2022 (v2)", "March 2023 (v2)", "March 2024 (v2)", "November 2010 (v1)",
            "November 2010 (v2)", "November 2010 (v3)", "November 2011 (v1)",
            "November 2011 (v2)", "November 2011 (v3)", "November 2012 (v1)",
            "November 2012 (v2)", "November 2012 (v3)", "November 2013 (v1)",
            "November 2013 (v2)", "November 2013 (v3)", "November 2014 (v1)",
            "November 2014 (v2)", "November 2014 (v3)", "November 2015 (v1)",
            "November 2015 (v2)", "November 2015 (v3)", "November 2016 (v1)",
            "November 2016 (v2)", "November 2016 (v3)", "November 2017 (v1)",
            "November 2017 (v2)", "November 2017 (v3)", "November 2018 (v1)",
            "November 2018 (v2)", "November 2018 (v3)", "November 2019 (v1)",
            "November 2019 (v2)", "November 2019 (v3)", "November 2020 (v1)",
            "November 2020 (v2)", "November 2020 (v3)", "November 2021 (v1)",
            "November 2021 (v2)", "November 2021 (v3)", "November 2022 (v1)",
            "November 2022 (v2)", "November 2022 (v3)", "November 2023 (v1)",
            "November 2023 (v2)", "November 2023 (v3)", "November 2024 (v1)",
            "November 2024 (v2)", "November 2024 (v3)", "Specimen 2016", "Specimen 2020",
            "Specimen 2023",
        ],
        ms: &[
            "June 2010 (v1)", "June 2010 (v2)", "June 2010 (v3)", "June 2011 (v1)",
            "June 2011 (v2)", "June 2011 (v3)", "June 2012 (v1)", "June 2012 (v2)",
            "June 2012 (v3)", "June 2013 (v1)", "June 2013 (v2)", "June 2013 (v3)",
            "June 2014 (v1)", "June 2014 (v2)", "June 2014 (v3)", "June 2015 (v1)",
            "June 2016 (v1)", "June 2016 (v2)", "June 2016 (v3)", "June 2017 (v1)",
            "June 2017 (v2)", "June 2017 (v3)", "June 2018", "June 2019 (v1)",
            "June 2019 (v2)", "June 2019 (v3)", "June 2020 (v1)", "June 2020 (v2)",
            "June 2020 (v3)", "June 2021 (v1)", "June 2021 (v2)", "June 2021 (v3)",
            "June 2022 (v1)", "June 2022 (v2)", "June 2022 (v3)", "June 2023 (v1)",
            "June 2023 (v2)", "June 2023 (v3)", "June 2024 (v1)", "June 2024 (v2)",
            "June 2024 (v3)", "March 2015 (v2)", "March 2016 (v2)", "March 2017 (v2)",
            "March 2018 (v2)", "March 2019 (v2)", "March 2020 (v2)", "March 2021 (v2)",
            "March 2022 (v2)", "March 2023 (v2)", "March 2024 (v2)", "November 2010 (v1)",
            "November 2010 (v2)", "November 2010 (v3)", "November 2011 (v1)",
            "November 2011 (v2)", "November 2011 (v3)", "November 2012 (v1)",
            "November 2012 (v2)", "November 2012 (v3)", "November 2013 (v1)",
            "November 2013 (v2)", "November 2013 (v3)", "November 2014 (v1)",
            "November 2014 (v2)", "November 2014 (v3)", "November 2015 (v1)",
            "November 2015 (v2)", "November 2015 (v3)", "November 2016 (v1)",
            "November 2016 (v2)", "November 2016 (v3)", "November 2017 (v1)",
            "November 2017 (v2)", "November 2017 (v3)", "November 2018 (v1)",
            "November 2018 (v2)", "November 2018 (v3)", "November 2019 (v1)",
            "November 2019 (v2)", "November 2019 (v3)", "November 2020 (v1)",
            "November 2020 (v2)", "November 2020 (v3)", "November 2021 (v1)",
            "November 2021 (v2)", "November 2021 (v3)", "November 2022 (v1)",
            "November 2022 (v2)", "November 2022 (v3)", "November 2023 (v1)",
            "November 2023 (v2)", "November 2023 (v3)", "November 2024 (v1)",
            "November 2024 (v2)", "November 2024 (v3)", "Specimen 2016", "Specimen 2020",
            "Specimen 2023",
        ],
    },
];

impl PaperSet {
    /// Short code used in generated filenames, e.g. "Paper-2" -> "P2".
    pub fn short_code(&self) -> String {
        self.paper.replace("Paper-", "P")
    }
}
