// Classifier tests.
// Spans are compared as (text,category) pairs, which is easier to read than offsets.

#[cfg(test)]
use super::{Category,ClassifiedSpan};
#[cfg(test)]
use super::highlighter::Classifier;
#[cfg(test)]
use super::settings;

#[cfg(test)]
fn pairs<'a>(text: &'a str, spans: &[ClassifiedSpan]) -> Vec<(&'a str,Category)> {
	spans.iter().map(|s| (&text[s.range()],s.category)).collect()
}

/// spans are in order with no gaps or overlaps and reach the end of the text
#[cfg(test)]
fn check_cover(text: &str, spans: &[ClassifiedSpan]) {
	let mut pos = 0;
	for s in spans {
		assert_eq!(s.start,pos,"gap or overlap at {}",pos);
		assert!(s.end > s.start);
		pos = s.end;
	}
	assert_eq!(pos,text.len());
}

#[cfg(test)]
fn test_classifier(text: &str, expected: &[(&str,Category)]) {
	let spans = Classifier::new().classify(text);
	check_cover(text,&spans);
	assert_eq!(pairs(text,&spans),expected.to_vec());
}

mod comments {
	use super::*;
	use crate::lang::rapid::Category::*;
	#[test]
	fn whole_line() {
		test_classifier("! this is a comment",&[("! this is a comment",Comment)]);
	}
	#[test]
	fn indented() {
		test_classifier("   ! MoveL \"x\" 10",&[("   ",Plain),("! MoveL \"x\" 10",Comment)]);
	}
	#[test]
	fn trailing() {
		test_classifier("x := 1; ! set x",&[("x := ",Plain),("1",NumberLiteral),("; ",Plain),("! set x",Comment)]);
	}
	#[test]
	fn bang_in_string() {
		test_classifier("TPWrite \"Hi!\";",&[("TPWrite",Instruction),(" ",Plain),("\"Hi!\"",StringLiteral),(";",Plain)]);
	}
	#[test]
	fn trailing_disabled() {
		let s = settings::parse(r#"{"highlight":{"trailingComments":false}}"#).expect("bad settings");
		let text = "x := 1; ! IF";
		let spans = Classifier::with_settings(&s).classify(text);
		assert_eq!(pairs(text,&spans),vec![("x := ",Plain),("1",NumberLiteral),("; ! ",Plain),("IF",Keyword)]);
	}
}

mod words {
	use super::*;
	use crate::lang::rapid::Category::*;
	#[test]
	fn move_instruction() {
		test_classifier("MoveL p10, v1000, z10, tool0;",&[
			("MoveL",Instruction),
			(" p",Plain),
			("10",NumberLiteral),
			(", v",Plain),
			("1000",NumberLiteral),
			(", z",Plain),
			("10",NumberLiteral),
			(", tool",Plain),
			("0",NumberLiteral),
			(";",Plain)
		]);
	}
	#[test]
	fn declaration() {
		test_classifier("VAR num counter := 0;",&[
			("VAR",Keyword),
			(" ",Plain),
			("num",DataType),
			(" counter := ",Plain),
			("0",NumberLiteral),
			(";",Plain)
		]);
	}
	#[test]
	fn keyword_precedence() {
		// words are only matched whole, `ENDIFX` is not `ENDIF`
		test_classifier("IF di1=1 THEN ENDIFX",&[
			("IF",Keyword),
			(" di",Plain),
			("1",NumberLiteral),
			("=",Plain),
			("1",NumberLiteral),
			(" ",Plain),
			("THEN",Keyword),
			(" ENDIFX",Plain)
		]);
	}
	#[test]
	fn underscore_splits_words() {
		test_classifier("my_num",&[("my_",Plain),("num",DataType)]);
	}
}

mod literals {
	use super::*;
	use crate::lang::rapid::Category::*;
	#[test]
	fn fractions() {
		test_classifier("1.5 2. 3.4.5",&[
			("1.5",NumberLiteral),
			(" ",Plain),
			("2",NumberLiteral),
			(". ",Plain),
			("3.4",NumberLiteral),
			(".",Plain),
			("5",NumberLiteral)
		]);
	}
	#[test]
	fn strings() {
		test_classifier("\"MoveL 10\"\"b\"",&[("\"MoveL 10\"\"b\"",StringLiteral)]);
	}
	#[test]
	fn unclosed_quote() {
		test_classifier("\"abc 5",&[("\"abc ",Plain),("5",NumberLiteral)]);
	}
}

mod documents {
	use super::*;
	use crate::lang::rapid::Category::*;
	#[test]
	fn multiline() {
		let text = "PROC p()\n  ! note\n  WaitTime 0.5;\nENDPROC\n";
		test_classifier(text,&[
			("PROC",Keyword),
			(" p()\n  ",Plain),
			("! note",Comment),
			("\n  ",Plain),
			("WaitTime",Instruction),
			(" ",Plain),
			("0.5",NumberLiteral),
			(";\n",Plain),
			("ENDPROC",Keyword),
			("\n",Plain)
		]);
	}
	#[test]
	fn empty() {
		assert!(Classifier::new().classify("").is_empty());
		test_classifier("\n\n",&[("\n\n",Plain)]);
	}
	#[test]
	fn context_free() {
		let whole = "MODULE m\nPROC p()\n  SetDO do1, 1;\nENDPROC\nENDMODULE\n";
		let body = "  SetDO do1, 1;";
		let c = Classifier::new();
		let inside: Vec<(&str,Category)> = pairs(whole,&c.classify(whole)).into_iter()
			.filter(|(_,cat)| *cat!=Plain).collect();
		let alone: Vec<(&str,Category)> = pairs(body,&c.classify(body)).into_iter()
			.filter(|(_,cat)| *cat!=Plain).collect();
		assert!(inside.windows(alone.len()).any(|w| w==alone.as_slice()));
	}
	#[test]
	fn non_ascii() {
		let text = "TPWrite \"Grüße\"; ! ä\nÜber 3";
		let spans = Classifier::new().classify(text);
		check_cover(text,&spans);
		assert_eq!(pairs(text,&spans),vec![
			("TPWrite",Instruction),
			(" ",Plain),
			("\"Grüße\"",StringLiteral),
			("; ",Plain),
			("! ä",Comment),
			("\nÜber ",Plain),
			("3",NumberLiteral)
		]);
	}
	#[test]
	fn free_function() {
		let spans = crate::lang::rapid::classify("RETURN");
		assert_eq!(spans,vec![ClassifiedSpan::new(0,6,Keyword)]);
	}
}
